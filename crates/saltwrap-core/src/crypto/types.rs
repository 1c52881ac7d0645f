use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    BOX_BEFORENMBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, HASH_BYTES,
    HASH_STATE_BYTES_REFERENCE, SIGN_BYTES, SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};

// Public halves and wire values: plain copyable newtypes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxPublicKey(pub [u8; BOX_PUBLICKEYBYTES]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignPublicKey(pub [u8; SIGN_PUBLICKEYBYTES]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce(pub [u8; BOX_NONCEBYTES]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGN_BYTES]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digest(pub [u8; HASH_BYTES]);

// Secret material: no Copy, redacted Debug, wiped on drop.

macro_rules! secret_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn zeroed() -> Self {
                Self([0u8; $len])
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn as_mut_bytes(&mut self) -> &mut [u8; $len] {
                &mut self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

secret_bytes!(BoxSecretKey, BOX_SECRETKEYBYTES);

secret_bytes!(
    /// Result of `box_precompute`. Reusable across many messages, each
    /// under its own nonce.
    SymmetricKey,
    BOX_BEFORENMBYTES
);

secret_bytes!(
    /// Ed25519 secret key in NaCl layout: `seed[32] || public_key[32]`.
    SignSecretKey,
    SIGN_SECRETKEYBYTES
);

secret_bytes!(SignSeed, SIGN_SEEDBYTES);

impl SignSecretKey {
    /// Public half embedded in the NaCl secret key layout.
    pub fn public_key(&self) -> SignPublicKey {
        let mut pk = [0u8; SIGN_PUBLICKEYBYTES];
        pk.copy_from_slice(&self.0[SIGN_SEEDBYTES..]);
        SignPublicKey(pk)
    }
}

/// Owned, correctly aligned hash state storage sized for both shipped
/// providers. Callers with their own buffers can pass any `&mut [u8]`
/// of at least `CryptoProvider::HASH_STATE_BYTES` instead.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[repr(C, align(8))]
pub struct HashStateBuffer([u8; HASH_STATE_BYTES_REFERENCE]);

impl HashStateBuffer {
    pub const CAPACITY: usize = HASH_STATE_BYTES_REFERENCE;

    pub fn new() -> Self {
        Self([0u8; HASH_STATE_BYTES_REFERENCE])
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl Default for HashStateBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashStateBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashStateBuffer").field("capacity", &Self::CAPACITY).finish()
    }
}

impl From<[u8; SIGN_SEEDBYTES]> for SignSeed {
    fn from(bytes: [u8; SIGN_SEEDBYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}
