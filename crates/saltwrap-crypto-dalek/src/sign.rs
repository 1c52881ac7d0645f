//! Ed25519 over NaCl key layout (`seed || public`).

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use saltwrap_core::constants::{SIGN_BYTES, SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES};
use saltwrap_core::ProviderFailure;
use zeroize::Zeroize;

fn export(key: &SigningKey, pk: &mut [u8; SIGN_PUBLICKEYBYTES], sk: &mut [u8; SIGN_SECRETKEYBYTES]) {
    let mut pair = key.to_keypair_bytes();
    sk.copy_from_slice(&pair);
    pk.copy_from_slice(&pair[SIGN_SEEDBYTES..]);
    pair.zeroize();
}

// The public half must match the seed; a mismatched pair is rejected
// rather than signed with.
fn load(sk: &[u8; SIGN_SECRETKEYBYTES]) -> Result<SigningKey, ProviderFailure> {
    SigningKey::from_keypair_bytes(sk).map_err(|_| ProviderFailure)
}

fn verifying_key(pk: &[u8; SIGN_PUBLICKEYBYTES]) -> Result<VerifyingKey, ProviderFailure> {
    VerifyingKey::from_bytes(pk).map_err(|_| ProviderFailure)
}

pub(crate) fn keypair(
    pk: &mut [u8; SIGN_PUBLICKEYBYTES],
    sk: &mut [u8; SIGN_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    export(&SigningKey::generate(&mut OsRng), pk, sk);
    Ok(())
}

pub(crate) fn seed_keypair(
    pk: &mut [u8; SIGN_PUBLICKEYBYTES],
    sk: &mut [u8; SIGN_SECRETKEYBYTES],
    seed: &[u8; SIGN_SEEDBYTES],
) -> Result<(), ProviderFailure> {
    export(&SigningKey::from_bytes(seed), pk, sk);
    Ok(())
}

pub(crate) fn sign_in_place(buf: &mut [u8], sk: &[u8; SIGN_SECRETKEYBYTES]) -> Result<(), ProviderFailure> {
    if buf.len() < SIGN_BYTES {
        return Err(ProviderFailure);
    }
    let key = load(sk)?;
    let (head, message) = buf.split_at_mut(SIGN_BYTES);
    head.copy_from_slice(&key.sign(message).to_bytes());
    Ok(())
}

pub(crate) fn sign_detached(
    sig: &mut [u8; SIGN_BYTES],
    message: &[u8],
    sk: &[u8; SIGN_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    *sig = load(sk)?.sign(message).to_bytes();
    Ok(())
}

pub(crate) fn verify_detached(
    sig: &[u8; SIGN_BYTES],
    message: &[u8],
    pk: &[u8; SIGN_PUBLICKEYBYTES],
) -> Result<(), ProviderFailure> {
    // Strict mode rejects small-order keys and R, as libsodium does.
    verifying_key(pk)?
        .verify_strict(message, &Signature::from_bytes(sig))
        .map_err(|_| ProviderFailure)
}

pub(crate) fn sign_open(
    out: &mut [u8],
    signed: &[u8],
    pk: &[u8; SIGN_PUBLICKEYBYTES],
) -> Result<usize, ProviderFailure> {
    if signed.len() < SIGN_BYTES || out.len() < signed.len() {
        return Err(ProviderFailure);
    }
    let (sig, message) = signed.split_at(SIGN_BYTES);
    let mut raw = [0u8; SIGN_BYTES];
    raw.copy_from_slice(sig);
    verify_detached(&raw, message, pk)?;

    out[..message.len()].copy_from_slice(message);
    Ok(message.len())
}
