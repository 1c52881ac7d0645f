//! SHA-512 with a byte-serializable streaming state.
//!
//! `sha2::Sha512` keeps its state private, so streaming over caller-owned
//! bytes drives `sha2::compress512` directly. The state layout matches
//! libsodium's in size (208 bytes):
//!
//! ```text
//! [  0.. 64)  h[0..8]       u64 little-endian
//! [ 64.. 80)  byte count    u128 little-endian
//! [ 80..208)  block buffer
//! ```

use std::slice;

use saltwrap_core::constants::{HASH_BYTES, HASH_STATE_BYTES_REFERENCE};
use saltwrap_core::ProviderFailure;
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha512};

pub(crate) const STATE_BYTES: usize = HASH_STATE_BYTES_REFERENCE;

const BLOCK: usize = 128;
const LEN_OFF: usize = 64;
const BUF_OFF: usize = 80;
const LENGTH_FIELD: usize = BLOCK - 16;

const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

pub(crate) fn oneshot(out: &mut [u8; HASH_BYTES], message: &[u8]) {
    out.copy_from_slice(&Sha512::digest(message));
}

struct State {
    h: [u64; 8],
    len: u128,
    buf: [u8; BLOCK],
}

impl State {
    fn fresh() -> Self {
        Self {
            h: IV,
            len: 0,
            buf: [0u8; BLOCK],
        }
    }

    fn load(bytes: &[u8]) -> Result<Self, ProviderFailure> {
        if bytes.len() < STATE_BYTES {
            return Err(ProviderFailure);
        }
        let mut h = [0u64; 8];
        for (i, word) in h.iter_mut().enumerate() {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            *word = u64::from_le_bytes(raw);
        }
        let mut raw_len = [0u8; 16];
        raw_len.copy_from_slice(&bytes[LEN_OFF..BUF_OFF]);
        let mut buf = [0u8; BLOCK];
        buf.copy_from_slice(&bytes[BUF_OFF..STATE_BYTES]);

        Ok(Self {
            h,
            len: u128::from_le_bytes(raw_len),
            buf,
        })
    }

    fn store(&self, bytes: &mut [u8]) {
        for (i, word) in self.h.iter().enumerate() {
            bytes[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
        }
        bytes[LEN_OFF..BUF_OFF].copy_from_slice(&self.len.to_le_bytes());
        bytes[BUF_OFF..STATE_BYTES].copy_from_slice(&self.buf);
    }

    fn compress_buf(&mut self) {
        sha2::compress512(&mut self.h, slice::from_ref(GenericArray::from_slice(&self.buf)));
    }

    fn update(&mut self, mut data: &[u8]) {
        let used = (self.len % BLOCK as u128) as usize;
        self.len += data.len() as u128;

        if used > 0 {
            let take = (BLOCK - used).min(data.len());
            self.buf[used..used + take].copy_from_slice(&data[..take]);
            data = &data[take..];
            if used + take < BLOCK {
                return;
            }
            self.compress_buf();
        }

        let full = data.len() - data.len() % BLOCK;
        for block in data[..full].chunks_exact(BLOCK) {
            sha2::compress512(&mut self.h, slice::from_ref(GenericArray::from_slice(block)));
        }
        let rest = &data[full..];
        self.buf[..rest.len()].copy_from_slice(rest);
    }

    fn finish(&mut self, out: &mut [u8; HASH_BYTES]) {
        let used = (self.len % BLOCK as u128) as usize;
        let bit_len = self.len.wrapping_mul(8);

        self.buf[used] = 0x80;
        self.buf[used + 1..].fill(0);
        if used >= LENGTH_FIELD {
            self.compress_buf();
            self.buf.fill(0);
        }
        self.buf[LENGTH_FIELD..].copy_from_slice(&bit_len.to_be_bytes());
        self.compress_buf();

        for (chunk, word) in out.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
    }
}

pub(crate) fn init(state: &mut [u8]) -> Result<(), ProviderFailure> {
    if state.len() < STATE_BYTES {
        return Err(ProviderFailure);
    }
    State::fresh().store(state);
    Ok(())
}

pub(crate) fn update(state: &mut [u8], chunk: &[u8]) -> Result<(), ProviderFailure> {
    let mut st = State::load(state)?;
    st.update(chunk);
    st.store(state);
    Ok(())
}

pub(crate) fn finish(state: &mut [u8], out: &mut [u8; HASH_BYTES]) -> Result<(), ProviderFailure> {
    let mut st = State::load(state)?;
    st.finish(out);
    st.store(state);
    Ok(())
}
