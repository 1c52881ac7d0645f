/*
    Byte-length constants of the NaCl-family construction.
      - box:  curve25519 + xsalsa20 + poly1305
      - sign: ed25519
      - hash: sha512
    Providers must agree with every value here. Only the hash state size
    may vary per provider, see `CryptoProvider::HASH_STATE_BYTES`.
*/

pub const BOX_PUBLICKEYBYTES: usize = 32;
pub const BOX_SECRETKEYBYTES: usize = 32;
pub const BOX_BEFORENMBYTES: usize = 32;
pub const BOX_NONCEBYTES: usize = 24;

/// Zero prefix required in front of a box plaintext.
pub const BOX_ZEROBYTES: usize = 32;

/// Zero prefix left in front of a box ciphertext (before the tag).
pub const BOX_BOXZEROBYTES: usize = 16;

/// Poly1305 authentication tag.
pub const BOX_MACBYTES: usize = BOX_ZEROBYTES - BOX_BOXZEROBYTES;

pub const SIGN_PUBLICKEYBYTES: usize = 32;
pub const SIGN_SECRETKEYBYTES: usize = 64;
pub const SIGN_SEEDBYTES: usize = 32;
pub const SIGN_BYTES: usize = 64;

pub const HASH_BYTES: usize = 64;

/// Reference SHA-512 state size (libsodium's `crypto_hash_sha512_state`:
/// `u64 state[8]`, `u64 count[2]`, `u8 buf[128]`). Both shipped providers
/// use exactly this; other providers may need a different size.
pub const HASH_STATE_BYTES_REFERENCE: usize = 8 * 8 + 2 * 8 + 128;
