use saltwrap_core::constants::{
    BOX_BEFORENMBYTES, BOX_BOXZEROBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, BOX_ZEROBYTES,
    HASH_BYTES, SIGN_BYTES, SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};
use saltwrap_core::ProviderFailure;
use zeroize::Zeroize;

use super::ffi;

fn check(rc: i32) -> Result<(), ProviderFailure> {
    if rc != 0 {
        return Err(ProviderFailure);
    }
    Ok(())
}

pub(crate) fn sodium_init() -> Result<(), ProviderFailure> {
    // 1 means "already initialized", which is fine.
    let rc = ffi::sodium_init();
    if rc < 0 {
        return Err(ProviderFailure);
    }
    Ok(())
}

pub(crate) fn check_sizes() -> Result<(), ProviderFailure> {
    let expected_box = [
        BOX_PUBLICKEYBYTES,
        BOX_SECRETKEYBYTES,
        BOX_BEFORENMBYTES,
        BOX_NONCEBYTES,
        BOX_ZEROBYTES,
        BOX_BOXZEROBYTES,
    ];
    let expected_sign = [SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES, SIGN_BYTES];
    let expected_hash = [HASH_BYTES, ffi::HASH_STATE_BYTES];

    if ffi::box_sizes() != expected_box || ffi::sign_sizes() != expected_sign || ffi::hash_sizes() != expected_hash {
        return Err(ProviderFailure);
    }
    Ok(())
}

// --- box ---
pub(crate) fn box_keypair(
    pk: &mut [u8; BOX_PUBLICKEYBYTES],
    sk: &mut [u8; BOX_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    check(ffi::box_keypair(pk.as_mut_ptr(), sk.as_mut_ptr()))
}

pub(crate) fn box_beforenm(
    k: &mut [u8; BOX_BEFORENMBYTES],
    pk: &[u8; BOX_PUBLICKEYBYTES],
    sk: &[u8; BOX_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    check(ffi::box_beforenm(k.as_mut_ptr(), pk.as_ptr(), sk.as_ptr()))
}

// libsodium takes the full padded length, prefix included.
pub(crate) fn box_afternm_in_place(
    buf: &mut [u8],
    nonce: &[u8; BOX_NONCEBYTES],
    k: &[u8; BOX_BEFORENMBYTES],
) -> Result<(), ProviderFailure> {
    if buf.len() < BOX_ZEROBYTES {
        return Err(ProviderFailure);
    }
    let p = buf.as_mut_ptr();
    check(ffi::box_afternm(p, p as *const u8, buf.len() as u64, nonce.as_ptr(), k.as_ptr()))
}

pub(crate) fn box_open_afternm_in_place(
    buf: &mut [u8],
    nonce: &[u8; BOX_NONCEBYTES],
    k: &[u8; BOX_BEFORENMBYTES],
) -> Result<(), ProviderFailure> {
    if buf.len() < BOX_ZEROBYTES {
        return Err(ProviderFailure);
    }
    let p = buf.as_mut_ptr();
    check(ffi::box_open_afternm(p, p as *const u8, buf.len() as u64, nonce.as_ptr(), k.as_ptr()))
}

// --- Ed25519 ---
pub(crate) fn sign_keypair(
    pk: &mut [u8; SIGN_PUBLICKEYBYTES],
    sk: &mut [u8; SIGN_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    check(ffi::sign_keypair(pk.as_mut_ptr(), sk.as_mut_ptr()))
}

pub(crate) fn sign_seed_keypair(
    pk: &mut [u8; SIGN_PUBLICKEYBYTES],
    sk: &mut [u8; SIGN_SECRETKEYBYTES],
    seed: &[u8; SIGN_SEEDBYTES],
) -> Result<(), ProviderFailure> {
    check(ffi::sign_seed_keypair(pk.as_mut_ptr(), sk.as_mut_ptr(), seed.as_ptr()))
}

// libsodium signs with whatever public half it is given; a secret key
// whose `pk` does not belong to its seed is refused instead.
fn check_secret_key(sk: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure> {
    let mut pk = [0u8; SIGN_PUBLICKEYBYTES];
    let mut derived = [0u8; SIGN_SECRETKEYBYTES];
    let rc = ffi::sign_seed_keypair(pk.as_mut_ptr(), derived.as_mut_ptr(), sk.as_ptr());
    let matches = rc == 0 && pk[..] == sk[SIGN_SEEDBYTES..];
    derived.zeroize();

    if !matches {
        return Err(ProviderFailure);
    }
    Ok(())
}

// buf = reserved[SIGN_BYTES] || m, signed as sm = m - SIGN_BYTES.
pub(crate) fn sign_in_place(buf: &mut [u8], sk: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure> {
    check_secret_key(sk)?;
    let mlen = buf.len().checked_sub(SIGN_BYTES).ok_or(ProviderFailure)?;
    let mut smlen: u64 = 0;

    let sm = buf.as_mut_ptr();
    // In bounds: mlen was checked above.
    let m = sm.wrapping_add(SIGN_BYTES) as *const u8;

    check(ffi::sign(sm, &mut smlen, m, mlen as u64, sk.as_ptr()))?;
    if smlen as usize != buf.len() {
        return Err(ProviderFailure);
    }
    Ok(())
}

pub(crate) fn sign_detached(
    sig: &mut [u8; SIGN_BYTES],
    msg: &[u8],
    sk: &[u8; SIGN_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    check_secret_key(sk)?;
    let mut siglen: u64 = 0;
    check(ffi::sign_detached(
        sig.as_mut_ptr(),
        &mut siglen,
        msg.as_ptr(),
        msg.len() as u64,
        sk.as_ptr(),
    ))?;
    if siglen as usize != SIGN_BYTES {
        return Err(ProviderFailure);
    }
    Ok(())
}

// `out` and `signed` are distinct borrows, so they cannot overlap.
pub(crate) fn sign_open(
    out: &mut [u8],
    signed: &[u8],
    pk: &[u8; SIGN_PUBLICKEYBYTES],
) -> Result<usize, ProviderFailure> {
    if signed.len() < SIGN_BYTES || out.len() < signed.len() {
        return Err(ProviderFailure);
    }
    let mut mlen: u64 = 0;
    check(ffi::sign_open(
        out.as_mut_ptr(),
        &mut mlen,
        signed.as_ptr(),
        signed.len() as u64,
        pk.as_ptr(),
    ))?;
    Ok(mlen as usize)
}

pub(crate) fn verify_detached(
    sig: &[u8; SIGN_BYTES],
    msg: &[u8],
    pk: &[u8; SIGN_PUBLICKEYBYTES],
) -> Result<(), ProviderFailure> {
    check(ffi::sign_verify_detached(
        sig.as_ptr(),
        msg.as_ptr(),
        msg.len() as u64,
        pk.as_ptr(),
    ))
}

// --- SHA-512 ---
pub(crate) fn hash(out: &mut [u8; HASH_BYTES], msg: &[u8]) -> Result<(), ProviderFailure> {
    check(ffi::hash_sha512(out.as_mut_ptr(), msg.as_ptr(), msg.len() as u64))
}

fn check_state(state: &[u8]) -> Result<(), ProviderFailure> {
    if state.len() < ffi::HASH_STATE_BYTES {
        return Err(ProviderFailure);
    }
    Ok(())
}

pub(crate) fn hash_init(state: &mut [u8]) -> Result<(), ProviderFailure> {
    check_state(state)?;
    check(ffi::hash_sha512_init(state.as_mut_ptr()))
}

pub(crate) fn hash_update(state: &mut [u8], chunk: &[u8]) -> Result<(), ProviderFailure> {
    check_state(state)?;
    check(ffi::hash_sha512_update(state.as_mut_ptr(), chunk.as_ptr(), chunk.len() as u64))
}

pub(crate) fn hash_final(state: &mut [u8], out: &mut [u8; HASH_BYTES]) -> Result<(), ProviderFailure> {
    check_state(state)?;
    check(ffi::hash_sha512_final(state.as_mut_ptr(), out.as_mut_ptr()))
}
