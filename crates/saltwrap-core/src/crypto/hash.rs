use std::fmt;

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::constants::HASH_BYTES;
use crate::crypto::{CryptoLayer, CryptoProvider, CryptoResult, Digest};
use crate::error::CryptoError;

/*
    Streaming SHA-512 over caller-owned, opaque state bytes.

      hash_init(bytes) -> HashState   capacity-checked, bytes untouched on error
      HashState::update(chunk)        zero or more times, order-sensitive
      HashState::finalize(self)       consumes the state, wipes the bytes

    The layer never looks inside the bytes; only the provider does.
*/
pub struct HashState<'s, 'p, P: CryptoProvider> {
    provider: &'p P,
    state: &'s mut [u8],
}

impl<P: CryptoProvider> CryptoLayer<P> {
    /// Start a multi-part hash in `state`, which must hold at least
    /// `P::HASH_STATE_BYTES` bytes.
    pub fn hash_init<'s>(&self, state: &'s mut [u8]) -> CryptoResult<HashState<'s, '_, P>> {
        if state.len() < P::HASH_STATE_BYTES {
            debug!(
                provider = P::NAME,
                required = P::HASH_STATE_BYTES,
                actual = state.len(),
                "hash state buffer below provider minimum"
            );
            return Err(CryptoError::Capacity {
                required: P::HASH_STATE_BYTES,
                actual: state.len(),
            });
        }

        let provider = self.provider();
        if provider.hash_init(state).is_err() {
            state.zeroize();
            return Err(CryptoError::Failure);
        }
        trace!(provider = P::NAME, "hash state initialized");
        Ok(HashState { provider, state })
    }
}

impl<'s, 'p, P: CryptoProvider> HashState<'s, 'p, P> {
    /// Feed the next chunk. Empty chunks are allowed.
    pub fn update(&mut self, chunk: &[u8]) -> CryptoResult<()> {
        trace!(provider = P::NAME, len = chunk.len(), "hash update");
        self.provider.hash_update(self.state, chunk)?;
        Ok(())
    }

    /// Produce the digest. The state cannot be used afterwards.
    pub fn finalize(self) -> CryptoResult<Digest> {
        let mut out = [0u8; HASH_BYTES];
        let result = self.provider.hash_final(self.state, &mut out);
        self.state.zeroize();
        result?;
        Ok(Digest(out))
    }
}

impl<P: CryptoProvider> fmt::Debug for HashState<'_, '_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashState")
            .field("provider", &P::NAME)
            .field("capacity", &self.state.len())
            .finish()
    }
}
