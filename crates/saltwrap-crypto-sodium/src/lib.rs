/*
    saltwrap-crypto-sodium
      - libsodium-based implementation of saltwrap-core's CryptoProvider.
      - All `unsafe` is confined to `sodium::ffi`.
*/
mod sodium;

use saltwrap_core::constants::{
    BOX_BEFORENMBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, HASH_BYTES, SIGN_BYTES,
    SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};
use saltwrap_core::{CryptoLayer, CryptoProvider, ProviderFailure};

/// Crypto provider backed by libsodium.
#[derive(Debug, Clone)]
pub struct SodiumCryptoProvider {
    _init: (),
}

impl SodiumCryptoProvider {
    pub fn new() -> Self {
        sodium::init();
        Self { _init: () }
    }
}

impl Default for SodiumCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The crypto layer wired to libsodium.
pub type SodiumCrypto = CryptoLayer<SodiumCryptoProvider>;

pub fn layer() -> SodiumCrypto {
    CryptoLayer::new(SodiumCryptoProvider::new())
}

impl CryptoProvider for SodiumCryptoProvider {
    const NAME: &'static str = "libsodium";
    const HASH_STATE_BYTES: usize = sodium::ffi::HASH_STATE_BYTES;

    fn box_keypair(
        &self,
        public: &mut [u8; BOX_PUBLICKEYBYTES],
        secret: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::box_keypair(public, secret)
    }

    fn box_beforenm(
        &self,
        shared: &mut [u8; BOX_BEFORENMBYTES],
        their_public: &[u8; BOX_PUBLICKEYBYTES],
        my_secret: &[u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::box_beforenm(shared, their_public, my_secret)
    }

    fn box_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::box_afternm_in_place(buf, nonce, key)
    }

    fn box_open_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::box_open_afternm_in_place(buf, nonce, key)
    }

    fn sign_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::sign_keypair(public, secret)
    }

    fn sign_seed_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
        seed: &[u8; SIGN_SEEDBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::sign_seed_keypair(public, secret, seed)
    }

    fn sign_in_place(&self, buf: &mut [u8], secret: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure> {
        sodium::safe::sign_in_place(buf, secret)
    }

    fn sign_detached(
        &self,
        signature: &mut [u8; SIGN_BYTES],
        message: &[u8],
        secret: &[u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::sign_detached(signature, message, secret)
    }

    fn sign_open(
        &self,
        out: &mut [u8],
        signed: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<usize, ProviderFailure> {
        sodium::safe::sign_open(out, signed, public)
    }

    fn verify_detached(
        &self,
        signature: &[u8; SIGN_BYTES],
        message: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        sodium::safe::verify_detached(signature, message, public)
    }

    fn hash(&self, out: &mut [u8; HASH_BYTES], message: &[u8]) -> Result<(), ProviderFailure> {
        sodium::safe::hash(out, message)
    }

    fn hash_init(&self, state: &mut [u8]) -> Result<(), ProviderFailure> {
        sodium::safe::hash_init(state)
    }

    fn hash_update(&self, state: &mut [u8], chunk: &[u8]) -> Result<(), ProviderFailure> {
        sodium::safe::hash_update(state, chunk)
    }

    fn hash_final(&self, state: &mut [u8], out: &mut [u8; HASH_BYTES]) -> Result<(), ProviderFailure> {
        sodium::safe::hash_final(state, out)
    }
}
