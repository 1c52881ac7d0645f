/*
    saltwrap-core
        buffer-layout contracts for NaCl-style box, sign and hash,
        delegated to a swappable `CryptoProvider`.
 */

pub mod constants;
pub mod crypto;
pub mod error;

pub use crypto::{CryptoLayer, CryptoProvider, CryptoResult, HashState};
pub use error::{CryptoError, ProviderFailure};
