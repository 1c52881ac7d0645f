use crate::constants::{
    BOX_BEFORENMBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, HASH_BYTES, SIGN_BYTES,
    SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};
use crate::error::ProviderFailure;

/*
    Trait boundary for the primitive implementation.
      - Callers never talk to a provider directly; they go through
        `CryptoLayer`, which checks every length before delegating.
      - Methods are buffer-level: fixed-size arrays for keys, slices for
        messages. Lengths below are guaranteed by the layer, so a provider
        may rely on them.
      - No method may allocate.
*/
pub trait CryptoProvider: Send + Sync + 'static {
    /// Short identifier used in logs.
    const NAME: &'static str;

    /// Minimum number of bytes of opaque hash state this provider needs.
    const HASH_STATE_BYTES: usize;

    fn box_keypair(
        &self,
        public: &mut [u8; BOX_PUBLICKEYBYTES],
        secret: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure>;

    fn box_beforenm(
        &self,
        shared: &mut [u8; BOX_BEFORENMBYTES],
        their_public: &[u8; BOX_PUBLICKEYBYTES],
        my_secret: &[u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure>;

    // buf.len() >= BOX_ZEROBYTES and buf[..BOX_ZEROBYTES] is zero.
    // Out: zeros[BOX_BOXZEROBYTES] || tag[BOX_MACBYTES] || ciphertext.
    fn box_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure>;

    // buf.len() >= BOX_ZEROBYTES.
    // Out on success: zeros[BOX_ZEROBYTES] || plaintext.
    fn box_open_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure>;

    fn sign_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure>;

    fn sign_seed_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
        seed: &[u8; SIGN_SEEDBYTES],
    ) -> Result<(), ProviderFailure>;

    // buf = reserved[SIGN_BYTES] || message. The message bytes stay put;
    // the signature is written over the reserved prefix.
    fn sign_in_place(&self, buf: &mut [u8], secret: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure>;

    fn sign_detached(
        &self,
        signature: &mut [u8; SIGN_BYTES],
        message: &[u8],
        secret: &[u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure>;

    // out.len() >= signed.len() >= SIGN_BYTES. Returns the message length.
    fn sign_open(
        &self,
        out: &mut [u8],
        signed: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<usize, ProviderFailure>;

    fn verify_detached(
        &self,
        signature: &[u8; SIGN_BYTES],
        message: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<(), ProviderFailure>;

    fn hash(&self, out: &mut [u8; HASH_BYTES], message: &[u8]) -> Result<(), ProviderFailure>;

    // state.len() >= HASH_STATE_BYTES for the three calls below.
    fn hash_init(&self, state: &mut [u8]) -> Result<(), ProviderFailure>;
    fn hash_update(&self, state: &mut [u8], chunk: &[u8]) -> Result<(), ProviderFailure>;
    fn hash_final(&self, state: &mut [u8], out: &mut [u8; HASH_BYTES]) -> Result<(), ProviderFailure>;
}
