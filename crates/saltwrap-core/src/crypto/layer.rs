use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::constants::{BOX_PUBLICKEYBYTES, BOX_ZEROBYTES, HASH_BYTES, SIGN_BYTES, SIGN_PUBLICKEYBYTES};
use crate::crypto::{
    BoxPublicKey, BoxSecretKey, CryptoProvider, Digest, Nonce, SignPublicKey, SignSecretKey, SignSeed,
    Signature, SymmetricKey,
};
use crate::error::CryptoError;

pub type CryptoResult<T> = Result<T, CryptoError>;

/*
    The crypto abstraction layer.
      - One synchronous delegation per call; no state between calls.
      - Every caller-declared length is checked here, before the provider
        runs, and reported as `CryptoError::Capacity`. Input that is too
        short to authenticate (sealed box, signed message) is a `Failure`.
      - Everything the provider rejects collapses into `CryptoError::Failure`,
        and any output region it may have touched is wiped.

    Aliasing preconditions differ per operation:

      box_encrypt / box_decrypt             distinct buffers
      box_encrypt_in_place / *_decrypt_*    same buffer (required)
      sign                                  distinct buffers
      sign_in_place                         buf = reserved[SIGN_BYTES] || message
      verify_and_open                       distinct buffers only
*/
#[derive(Debug, Default, Clone)]
pub struct CryptoLayer<P: CryptoProvider> {
    provider: P,
}

impl<P: CryptoProvider> CryptoLayer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Minimum hash state capacity accepted by `hash_init`.
    pub fn hash_state_bytes(&self) -> usize {
        P::HASH_STATE_BYTES
    }

    // --- keypairs ---

    /// Fresh X25519 key pair. On error nothing is returned, so partial
    /// output can never be picked up by the caller.
    pub fn generate_box_keypair(&self) -> CryptoResult<(BoxPublicKey, BoxSecretKey)> {
        let mut public = [0u8; BOX_PUBLICKEYBYTES];
        let mut secret = BoxSecretKey::zeroed();
        self.provider.box_keypair(&mut public, secret.as_mut_bytes())?;
        trace!(provider = P::NAME, "box keypair generated");
        Ok((BoxPublicKey(public), secret))
    }

    /// Fresh Ed25519 key pair, in a key space separate from box keys.
    pub fn generate_signing_keypair(&self) -> CryptoResult<(SignPublicKey, SignSecretKey)> {
        let mut public = [0u8; SIGN_PUBLICKEYBYTES];
        let mut secret = SignSecretKey::zeroed();
        self.provider.sign_keypair(&mut public, secret.as_mut_bytes())?;
        trace!(provider = P::NAME, "signing keypair generated");
        Ok((SignPublicKey(public), secret))
    }

    /// Deterministic Ed25519 key pair from a 32-byte seed.
    pub fn signing_keypair_from_seed(&self, seed: &SignSeed) -> CryptoResult<(SignPublicKey, SignSecretKey)> {
        let mut public = [0u8; SIGN_PUBLICKEYBYTES];
        let mut secret = SignSecretKey::zeroed();
        self.provider
            .sign_seed_keypair(&mut public, secret.as_mut_bytes(), seed.as_bytes())?;
        Ok((SignPublicKey(public), secret))
    }

    // --- box ---

    /// Key agreement half of box ("beforenm"). Run once per peer, then
    /// reuse the result with a fresh nonce per message.
    pub fn box_precompute(&self, their_public: &BoxPublicKey, my_secret: &BoxSecretKey) -> CryptoResult<SymmetricKey> {
        let mut key = SymmetricKey::zeroed();
        if self
            .provider
            .box_beforenm(key.as_mut_bytes(), &their_public.0, my_secret.as_bytes())
            .is_err()
        {
            debug!(provider = P::NAME, "box key agreement rejected");
            return Err(CryptoError::Failure);
        }
        Ok(key)
    }

    /// Encrypt `plaintext` (`zeros[BOX_ZEROBYTES] || message`) into
    /// `out[..plaintext.len()]` as `zeros[BOX_BOXZEROBYTES] || tag || ciphertext`.
    pub fn box_encrypt(&self, out: &mut [u8], plaintext: &[u8], nonce: &Nonce, key: &SymmetricKey) -> CryptoResult<()> {
        check_box_len(plaintext.len())?;
        check_out(plaintext.len(), out.len())?;

        let out = &mut out[..plaintext.len()];
        out[BOX_ZEROBYTES..].copy_from_slice(&plaintext[BOX_ZEROBYTES..]);
        self.seal(out, nonce, key)
    }

    /// In-place variant of `box_encrypt`: `buf` holds the padded plaintext
    /// on entry and the padded ciphertext on return.
    pub fn box_encrypt_in_place(&self, buf: &mut [u8], nonce: &Nonce, key: &SymmetricKey) -> CryptoResult<()> {
        check_box_len(buf.len())?;
        self.seal(buf, nonce, key)
    }

    /// Verify and decrypt `ciphertext` (`zeros[BOX_BOXZEROBYTES] || tag || body`)
    /// into `out[..ciphertext.len()]` as `zeros[BOX_ZEROBYTES] || message`.
    ///
    /// On authentication failure the output region is wiped.
    pub fn box_decrypt(&self, out: &mut [u8], ciphertext: &[u8], nonce: &Nonce, key: &SymmetricKey) -> CryptoResult<()> {
        check_sealed_len::<P>(ciphertext.len())?;
        check_out(ciphertext.len(), out.len())?;

        let out = &mut out[..ciphertext.len()];
        out.copy_from_slice(ciphertext);
        self.open(out, nonce, key)
    }

    /// In-place variant of `box_decrypt`. On failure `buf` is wiped.
    pub fn box_decrypt_in_place(&self, buf: &mut [u8], nonce: &Nonce, key: &SymmetricKey) -> CryptoResult<()> {
        check_sealed_len::<P>(buf.len())?;
        self.open(buf, nonce, key)
    }

    fn seal(&self, buf: &mut [u8], nonce: &Nonce, key: &SymmetricKey) -> CryptoResult<()> {
        // Providers require an all-zero prefix.
        buf[..BOX_ZEROBYTES].fill(0);

        trace!(provider = P::NAME, len = buf.len() - BOX_ZEROBYTES, "box encrypt");
        if self.provider.box_afternm_in_place(buf, &nonce.0, key.as_bytes()).is_err() {
            buf.zeroize();
            debug!(provider = P::NAME, "box encryption failed");
            return Err(CryptoError::Failure);
        }
        Ok(())
    }

    fn open(&self, buf: &mut [u8], nonce: &Nonce, key: &SymmetricKey) -> CryptoResult<()> {
        trace!(provider = P::NAME, len = buf.len() - BOX_ZEROBYTES, "box decrypt");
        if self.provider.box_open_afternm_in_place(buf, &nonce.0, key.as_bytes()).is_err() {
            buf.zeroize();
            debug!(provider = P::NAME, "box authentication failed");
            return Err(CryptoError::Failure);
        }
        Ok(())
    }

    // --- sign ---

    /// Write `signature || message` into `out` and return the signed length
    /// (`message.len() + SIGN_BYTES`).
    pub fn sign(&self, out: &mut [u8], message: &[u8], secret: &SignSecretKey) -> CryptoResult<usize> {
        let signed_len = message.len() + SIGN_BYTES;
        check_out(signed_len, out.len())?;

        let out = &mut out[..signed_len];
        out[SIGN_BYTES..].copy_from_slice(message);
        self.sign_reserved(out, secret)
    }

    /// Sign a message that already sits behind `SIGN_BYTES` reserved bytes:
    /// `buf = reserved[SIGN_BYTES] || message` becomes
    /// `buf = signature || message`. The message bytes are not moved.
    pub fn sign_in_place(&self, buf: &mut [u8], secret: &SignSecretKey) -> CryptoResult<usize> {
        check_out(SIGN_BYTES, buf.len())?;
        self.sign_reserved(buf, secret)
    }

    fn sign_reserved(&self, buf: &mut [u8], secret: &SignSecretKey) -> CryptoResult<usize> {
        trace!(provider = P::NAME, len = buf.len() - SIGN_BYTES, "sign");
        if self.provider.sign_in_place(buf, secret.as_bytes()).is_err() {
            buf[..SIGN_BYTES].zeroize();
            debug!(provider = P::NAME, "signing failed");
            return Err(CryptoError::Failure);
        }
        Ok(buf.len())
    }

    pub fn sign_detached(&self, message: &[u8], secret: &SignSecretKey) -> CryptoResult<Signature> {
        let mut signature = [0u8; SIGN_BYTES];
        self.provider.sign_detached(&mut signature, message, secret.as_bytes())?;
        Ok(Signature(signature))
    }

    /// Verify `signature || message` and copy the message into `out`.
    ///
    /// `out` must be a separate buffer of at least `signed.len()` bytes.
    /// Returns the message length; on failure the output region is wiped.
    pub fn verify_and_open(&self, out: &mut [u8], signed: &[u8], public: &SignPublicKey) -> CryptoResult<usize> {
        check_out(signed.len(), out.len())?;

        let out = &mut out[..signed.len()];
        let expected = match signed.len().checked_sub(SIGN_BYTES) {
            Some(n) => n,
            None => {
                debug!(provider = P::NAME, len = signed.len(), "signed message shorter than a signature");
                return Err(CryptoError::Failure);
            }
        };

        match self.provider.sign_open(out, signed, &public.0) {
            Ok(n) if n == expected => Ok(n),
            _ => {
                out.zeroize();
                debug!(provider = P::NAME, "signature verification failed");
                Err(CryptoError::Failure)
            }
        }
    }

    /// Verify a signature carried separately from its message.
    pub fn verify_detached(&self, signature: &Signature, message: &[u8], public: &SignPublicKey) -> CryptoResult<()> {
        if self.provider.verify_detached(&signature.0, message, &public.0).is_err() {
            debug!(provider = P::NAME, "detached signature verification failed");
            return Err(CryptoError::Failure);
        }
        Ok(())
    }

    // --- hash ---

    /// Whole-buffer SHA-512. Prefer this over the streaming API when the
    /// message is already contiguous.
    pub fn hash_oneshot(&self, message: &[u8]) -> CryptoResult<Digest> {
        let mut out = [0u8; HASH_BYTES];
        self.provider.hash(&mut out, message)?;
        Ok(Digest(out))
    }
}

fn check_box_len(len: usize) -> CryptoResult<()> {
    if len < BOX_ZEROBYTES {
        debug!(required = BOX_ZEROBYTES, actual = len, "box buffer shorter than its zero padding");
    }
    CryptoError::check_capacity(BOX_ZEROBYTES, len)
}

// Sealed input too short to carry a tag is an authentication failure, not
// a capacity error: the decrypt path reports no subtype.
fn check_sealed_len<P: CryptoProvider>(len: usize) -> CryptoResult<()> {
    if len < BOX_ZEROBYTES {
        debug!(provider = P::NAME, len, "sealed box shorter than its padding");
        return Err(CryptoError::Failure);
    }
    Ok(())
}

fn check_out(required: usize, actual: usize) -> CryptoResult<()> {
    if actual < required {
        debug!(required, actual, "output buffer too small");
    }
    CryptoError::check_capacity(required, actual)
}
