use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::constants::{
    BOX_BEFORENMBYTES, BOX_BOXZEROBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, BOX_ZEROBYTES,
    HASH_BYTES, SIGN_BYTES, SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};
use crate::crypto::CryptoProvider;
use crate::error::ProviderFailure;

/*
    Deterministic stand-in provider for layer contract tests.
    Not cryptography: it only has the right buffer shapes and rejects
    tampered input.
*/
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    pub(crate) calls: AtomicUsize,
    pub(crate) fail: AtomicBool,
    pub(crate) misreport_open_len: AtomicBool,
}

impl MockProvider {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), ProviderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ProviderFailure);
        }
        Ok(())
    }
}

const MOCK_STATE_BYTES: usize = 16;

fn public_from_secret(secret: &[u8; 32]) -> [u8; 32] {
    let mut pk = [0u8; 32];
    for (p, s) in pk.iter_mut().zip(secret) {
        *p = s ^ 0x5a;
    }
    pk
}

fn keystream(key: &[u8; BOX_BEFORENMBYTES], nonce: &[u8; BOX_NONCEBYTES], i: usize) -> u8 {
    key[i % 32] ^ nonce[i % 24] ^ (i as u8)
}

fn weak_mac(key: &[u8], body: &[u8]) -> [u8; 16] {
    let mut tag = [0u8; 16];
    for (i, k) in key.iter().enumerate() {
        tag[i % 16] ^= k.wrapping_mul(3);
    }
    for (i, b) in body.iter().enumerate() {
        let slot = &mut tag[i % 16];
        *slot = slot.rotate_left(3) ^ b.wrapping_add(i as u8);
    }
    tag
}

fn weak_sig(public: &[u8], message: &[u8]) -> [u8; SIGN_BYTES] {
    let mut sig = [0u8; SIGN_BYTES];
    sig[..16].copy_from_slice(&weak_mac(public, message));
    sig[16..32].copy_from_slice(&weak_mac(message, public));
    sig[32..48].copy_from_slice(&weak_mac(public, &(message.len() as u64).to_le_bytes()));
    sig
}

fn fnv_step(h: u64, b: u8) -> u64 {
    (h ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

fn expand_digest(h: u64, len: u64, out: &mut [u8; HASH_BYTES]) {
    for (i, o) in out.iter_mut().enumerate() {
        let word = if i < 32 { h } else { len };
        *o = (word >> (8 * (i % 8))) as u8 ^ i as u8;
    }
}

impl CryptoProvider for MockProvider {
    const NAME: &'static str = "mock";
    const HASH_STATE_BYTES: usize = MOCK_STATE_BYTES;

    fn box_keypair(
        &self,
        public: &mut [u8; BOX_PUBLICKEYBYTES],
        secret: &mut [u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        let n = self.calls() as u8;
        secret.fill(n);
        *public = public_from_secret(secret);
        Ok(())
    }

    fn box_beforenm(
        &self,
        shared: &mut [u8; BOX_BEFORENMBYTES],
        their_public: &[u8; BOX_PUBLICKEYBYTES],
        my_secret: &[u8; BOX_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        for i in 0..BOX_BEFORENMBYTES {
            shared[i] = their_public[i] ^ my_secret[i];
        }
        Ok(())
    }

    fn box_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        assert!(buf[..BOX_ZEROBYTES].iter().all(|&b| b == 0), "padding must be zero");
        for (i, b) in buf[BOX_ZEROBYTES..].iter_mut().enumerate() {
            *b ^= keystream(key, nonce, i);
        }
        let tag = weak_mac(key, &buf[BOX_ZEROBYTES..]);
        buf[BOX_BOXZEROBYTES..BOX_ZEROBYTES].copy_from_slice(&tag);
        Ok(())
    }

    fn box_open_afternm_in_place(
        &self,
        buf: &mut [u8],
        nonce: &[u8; BOX_NONCEBYTES],
        key: &[u8; BOX_BEFORENMBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        if weak_mac(key, &buf[BOX_ZEROBYTES..]) != buf[BOX_BOXZEROBYTES..BOX_ZEROBYTES] {
            return Err(ProviderFailure);
        }
        for (i, b) in buf[BOX_ZEROBYTES..].iter_mut().enumerate() {
            *b ^= keystream(key, nonce, i);
        }
        buf[..BOX_ZEROBYTES].fill(0);
        Ok(())
    }

    fn sign_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        let seed = [self.calls() as u8; SIGN_SEEDBYTES];
        self.sign_seed_keypair(public, secret, &seed)
    }

    fn sign_seed_keypair(
        &self,
        public: &mut [u8; SIGN_PUBLICKEYBYTES],
        secret: &mut [u8; SIGN_SECRETKEYBYTES],
        seed: &[u8; SIGN_SEEDBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        *public = public_from_secret(seed);
        secret[..SIGN_SEEDBYTES].copy_from_slice(seed);
        secret[SIGN_SEEDBYTES..].copy_from_slice(public);
        Ok(())
    }

    fn sign_in_place(&self, buf: &mut [u8], secret: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure> {
        self.enter()?;
        let sig = weak_sig(&secret[SIGN_SEEDBYTES..], &buf[SIGN_BYTES..]);
        buf[..SIGN_BYTES].copy_from_slice(&sig);
        Ok(())
    }

    fn sign_detached(
        &self,
        signature: &mut [u8; SIGN_BYTES],
        message: &[u8],
        secret: &[u8; SIGN_SECRETKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        *signature = weak_sig(&secret[SIGN_SEEDBYTES..], message);
        Ok(())
    }

    fn sign_open(
        &self,
        out: &mut [u8],
        signed: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<usize, ProviderFailure> {
        self.enter()?;
        let (sig, message) = signed.split_at(SIGN_BYTES);
        if weak_sig(public, message)[..] != sig[..] {
            // Scribble over the output like a careless provider would.
            out.fill(0xee);
            return Err(ProviderFailure);
        }
        out[..message.len()].copy_from_slice(message);
        if self.misreport_open_len.load(Ordering::SeqCst) {
            return Ok(message.len() + 1);
        }
        Ok(message.len())
    }

    fn verify_detached(
        &self,
        signature: &[u8; SIGN_BYTES],
        message: &[u8],
        public: &[u8; SIGN_PUBLICKEYBYTES],
    ) -> Result<(), ProviderFailure> {
        self.enter()?;
        if weak_sig(public, message) != *signature {
            return Err(ProviderFailure);
        }
        Ok(())
    }

    fn hash(&self, out: &mut [u8; HASH_BYTES], message: &[u8]) -> Result<(), ProviderFailure> {
        self.enter()?;
        let h = message.iter().fold(FNV_OFFSET, |h, &b| fnv_step(h, b));
        expand_digest(h, message.len() as u64, out);
        Ok(())
    }

    fn hash_init(&self, state: &mut [u8]) -> Result<(), ProviderFailure> {
        self.enter()?;
        state[..8].copy_from_slice(&FNV_OFFSET.to_le_bytes());
        state[8..MOCK_STATE_BYTES].fill(0);
        Ok(())
    }

    fn hash_update(&self, state: &mut [u8], chunk: &[u8]) -> Result<(), ProviderFailure> {
        self.enter()?;
        let mut h = u64::from_le_bytes(state[..8].try_into().map_err(|_| ProviderFailure)?);
        let mut len = u64::from_le_bytes(state[8..16].try_into().map_err(|_| ProviderFailure)?);
        for &b in chunk {
            h = fnv_step(h, b);
        }
        len += chunk.len() as u64;
        state[..8].copy_from_slice(&h.to_le_bytes());
        state[8..16].copy_from_slice(&len.to_le_bytes());
        Ok(())
    }

    fn hash_final(&self, state: &mut [u8], out: &mut [u8; HASH_BYTES]) -> Result<(), ProviderFailure> {
        self.enter()?;
        let h = u64::from_le_bytes(state[..8].try_into().map_err(|_| ProviderFailure)?);
        let len = u64::from_le_bytes(state[8..16].try_into().map_err(|_| ProviderFailure)?);
        expand_digest(h, len, out);
        Ok(())
    }
}
