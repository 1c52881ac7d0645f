//! Unsafe FFI calls into libsodium.
//!
//! Policy: This is the only module allowed to use `unsafe` in this crate.
//! Callers (`safe`) are responsible for pointer validity and lengths.

use libsodium_sys as sodium;
use std::os::raw::{c_int, c_uchar, c_ulonglong};
use std::ptr;

pub(crate) type HashState = sodium::crypto_hash_sha512_state;

pub(crate) const HASH_STATE_BYTES: usize = std::mem::size_of::<HashState>();

pub(crate) fn sodium_init() -> c_int {
    unsafe { sodium::sodium_init() }
}

// --- runtime size reporting ---
pub(crate) fn box_sizes() -> [usize; 6] {
    unsafe {
        [
            sodium::crypto_box_publickeybytes() as usize,
            sodium::crypto_box_secretkeybytes() as usize,
            sodium::crypto_box_beforenmbytes() as usize,
            sodium::crypto_box_noncebytes() as usize,
            sodium::crypto_box_zerobytes() as usize,
            sodium::crypto_box_boxzerobytes() as usize,
        ]
    }
}

pub(crate) fn sign_sizes() -> [usize; 4] {
    unsafe {
        [
            sodium::crypto_sign_publickeybytes() as usize,
            sodium::crypto_sign_secretkeybytes() as usize,
            sodium::crypto_sign_seedbytes() as usize,
            sodium::crypto_sign_bytes() as usize,
        ]
    }
}

pub(crate) fn hash_sizes() -> [usize; 2] {
    unsafe { [sodium::crypto_hash_sha512_bytes() as usize, sodium::crypto_hash_sha512_statebytes() as usize] }
}

// --- box (curve25519xsalsa20poly1305, NaCl padding) ---
pub(crate) fn box_keypair(pk: *mut c_uchar, sk: *mut c_uchar) -> c_int {
    unsafe { sodium::crypto_box_keypair(pk as *mut _, sk as *mut _) }
}

pub(crate) fn box_beforenm(k: *mut c_uchar, pk: *const c_uchar, sk: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_box_beforenm(k as *mut _, pk as *const _, sk as *const _) }
}

// c and m may be equal.
pub(crate) fn box_afternm(
    c: *mut c_uchar,
    m: *const c_uchar,
    mlen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_box_afternm(c as *mut _, m as *const _, mlen, n as *const _, k as *const _) }
}

// m and c may be equal.
pub(crate) fn box_open_afternm(
    m: *mut c_uchar,
    c: *const c_uchar,
    clen: c_ulonglong,
    n: *const c_uchar,
    k: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_box_open_afternm(m as *mut _, c as *const _, clen, n as *const _, k as *const _) }
}

// --- Ed25519 ---
pub(crate) fn sign_keypair(pk: *mut c_uchar, sk: *mut c_uchar) -> c_int {
    unsafe { sodium::crypto_sign_keypair(pk as *mut _, sk as *mut _) }
}

pub(crate) fn sign_seed_keypair(pk: *mut c_uchar, sk: *mut c_uchar, seed: *const c_uchar) -> c_int {
    unsafe { sodium::crypto_sign_seed_keypair(pk as *mut _, sk as *mut _, seed as *const _) }
}

// sm may equal m - crypto_sign_BYTES.
pub(crate) fn sign(
    sm: *mut c_uchar,
    smlen: *mut c_ulonglong,
    m: *const c_uchar,
    mlen: c_ulonglong,
    sk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign(sm as *mut _, smlen as *mut _, m as *const _, mlen, sk as *const _) }
}

pub(crate) fn sign_detached(
    sig: *mut c_uchar,
    siglen: *mut c_ulonglong,
    msg: *const c_uchar,
    msglen: c_ulonglong,
    sk: *const c_uchar,
) -> c_int {
    unsafe {
        sodium::crypto_sign_detached(
            sig as *mut _,
            siglen as *mut _,
            msg as *const _,
            msglen,
            sk as *const _,
        )
    }
}

// m must not overlap sm.
pub(crate) fn sign_open(
    m: *mut c_uchar,
    mlen: *mut c_ulonglong,
    sm: *const c_uchar,
    smlen: c_ulonglong,
    pk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign_open(m as *mut _, mlen as *mut _, sm as *const _, smlen, pk as *const _) }
}

pub(crate) fn sign_verify_detached(
    sig: *const c_uchar,
    msg: *const c_uchar,
    msglen: c_ulonglong,
    pk: *const c_uchar,
) -> c_int {
    unsafe { sodium::crypto_sign_verify_detached(sig as *const _, msg as *const _, msglen, pk as *const _) }
}

// --- SHA-512 ---
pub(crate) fn hash_sha512(out: *mut c_uchar, input: *const c_uchar, inlen: c_ulonglong) -> c_int {
    unsafe { sodium::crypto_hash_sha512(out as *mut _, input as *const _, inlen) }
}

// The caller's state bytes carry no alignment guarantee, so the state is
// copied into a properly aligned local for every call.

pub(crate) fn hash_sha512_init(state: *mut c_uchar) -> c_int {
    unsafe {
        let mut st: HashState = ptr::read_unaligned(state as *const HashState);
        let rc = sodium::crypto_hash_sha512_init(&mut st);
        ptr::write_unaligned(state as *mut HashState, st);
        rc
    }
}

pub(crate) fn hash_sha512_update(state: *mut c_uchar, input: *const c_uchar, inlen: c_ulonglong) -> c_int {
    unsafe {
        let mut st: HashState = ptr::read_unaligned(state as *const HashState);
        let rc = sodium::crypto_hash_sha512_update(&mut st, input as *const _, inlen);
        ptr::write_unaligned(state as *mut HashState, st);
        rc
    }
}

pub(crate) fn hash_sha512_final(state: *mut c_uchar, out: *mut c_uchar) -> c_int {
    unsafe {
        let mut st: HashState = ptr::read_unaligned(state as *const HashState);
        let rc = sodium::crypto_hash_sha512_final(&mut st, out as *mut _);
        ptr::write_unaligned(state as *mut HashState, st);
        rc
    }
}
