/*
    saltwrap-crypto-dalek
      - Pure-Rust implementation of saltwrap-core's CryptoProvider.
      - X25519 and Ed25519 from the dalek crates, XSalsa20-Poly1305 and
        SHA-512 from RustCrypto. Output is byte-compatible with libsodium.
*/
mod curve_box;
mod sha512;
mod sign;

use saltwrap_core::constants::{
    BOX_BEFORENMBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, HASH_BYTES, SIGN_BYTES,
    SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};
use saltwrap_core::{CryptoLayer, CryptoProvider, ProviderFailure};

/// Crypto provider with no C dependencies.
#[derive(Debug, Clone, Copy, Default)]
pub struct DalekCryptoProvider;

/// The crypto layer wired to the pure-Rust provider.
pub type DalekCrypto = CryptoLayer<DalekCryptoProvider>;

pub fn layer() -> DalekCrypto {
    CryptoLayer::new(DalekCryptoProvider)
}

impl CryptoProvider for DalekCryptoProvider {
    const NAME: &'static str = "dalek";
    const HASH_STATE_BYTES: usize = sha512::STATE_BYTES;

    fn box_keypair(
        &self,
        public: &mut [u8; BOX_PUBLICKEYBYTES],
        secret: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        curve_box::keypair(public, secret)
    }

    fn box_beforenm(
        &self,
        shared: &mut [u8; BOX_BEFORENMBYTES],
        their_public: &[u8; BOX_PUBLICKEYBYTES],
        my_secret: &[u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        curve_box::beforenm(shared, their_public, my_secret)
    }

    fn box_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure> {
        curve_box::seal_in_place(buf, nonce, key)
    }

    fn box_open_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure> {
        curve_box::open_in_place(buf, nonce, key)
    }

    fn sign_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sign::keypair(public, secret)
    }

    fn sign_seed_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
        seed: &[u8; SIGN_SEEDBYTES],
    ) -> Result<(), ProviderFailure> {
        sign::seed_keypair(public, secret, seed)
    }

    fn sign_in_place(&self, buf: &mut [u8], secret: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure> {
        sign::sign_in_place(buf, secret)
    }

    fn sign_detached(
        &self,
        signature: &mut [u8; SIGN_BYTES],
        message: &[u8],
        secret: &[u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sign::sign_detached(signature, message, secret)
    }

    fn sign_open(
        &self,
        out: &mut [u8],
        signed: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<usize, ProviderFailure> {
        sign::sign_open(out, signed, public)
    }

    fn verify_detached(
        &self,
        signature: &[u8; SIGN_BYTES],
        message: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sign::verify_detached(signature, message, public)
    }

    fn hash(&self, out: &mut [u8; HASH_BYTES], message: &[u8]) -> Result<(), ProviderFailure> {
        sha512::oneshot(out, message);
        Ok(())
    }

    fn hash_init(&self, state: &mut [u8]) -> Result<(), ProviderFailure> {
        sha512::init(state)
    }

    fn hash_update(&self, state: &mut [u8], chunk: &[u8]) -> Result<(), ProviderFailure> {
        sha512::update(state, chunk)
    }

    fn hash_final(&self, state: &mut [u8], out: &mut [u8; HASH_BYTES]) -> Result<(), ProviderFailure> {
        sha512::finish(state, out)
    }
}
