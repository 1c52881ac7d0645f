//! curve25519xsalsa20poly1305 with NaCl padding.
//!
//! `beforenm` is X25519 followed by HSalsa20 over a zero input block; the
//! per-message step is XSalsa20-Poly1305 secretbox applied in place past
//! the `BOX_ZEROBYTES` prefix, with the tag written into the prefix.

use crypto_secretbox::aead::consts::U10;
use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{AeadInPlace, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand::rngs::OsRng;
use saltwrap_core::constants::{
    BOX_BEFORENMBYTES, BOX_BOXZEROBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES, BOX_ZEROBYTES,
};
use saltwrap_core::ProviderFailure;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

pub(crate) fn keypair(
    pk: &mut [u8; BOX_PUBLICKEYBYTES],
    sk: &mut [u8; BOX_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    let secret = StaticSecret::random_from_rng(OsRng);
    *pk = PublicKey::from(&secret).to_bytes();
    *sk = secret.to_bytes();
    Ok(())
}

pub(crate) fn beforenm(
    k: &mut [u8; BOX_BEFORENMBYTES],
    pk: &[u8; BOX_PUBLICKEYBYTES],
    sk: &[u8; BOX_SECRETKEYBYTES],
) -> Result<(), ProviderFailure> {
    let secret = StaticSecret::from(*sk);
    let shared = secret.diffie_hellman(&PublicKey::from(*pk));
    // Same rule as libsodium: an all-zero agreement means a low-order peer key.
    if !shared.was_contributory() {
        return Err(ProviderFailure);
    }

    let mut derived = salsa20::hsalsa::<U10>(GenericArray::from_slice(shared.as_bytes()), &GenericArray::default());
    k.copy_from_slice(&derived);
    derived.as_mut_slice().zeroize();
    Ok(())
}

fn cipher(k: &[u8; BOX_BEFORENMBYTES]) -> XSalsa20Poly1305 {
    XSalsa20Poly1305::new(GenericArray::from_slice(k))
}

pub(crate) fn seal_in_place(
    buf: &mut [u8],
    nonce: &[u8; BOX_NONCEBYTES],
    k: &[u8; BOX_BEFORENMBYTES],
) -> Result<(), ProviderFailure> {
    if buf.len() < BOX_ZEROBYTES {
        return Err(ProviderFailure);
    }
    let (head, body) = buf.split_at_mut(BOX_ZEROBYTES);
    let tag = cipher(k)
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), b"", body)
        .map_err(|_| ProviderFailure)?;

    head[..BOX_BOXZEROBYTES].fill(0);
    head[BOX_BOXZEROBYTES..].copy_from_slice(&tag);
    Ok(())
}

pub(crate) fn open_in_place(
    buf: &mut [u8],
    nonce: &[u8; BOX_NONCEBYTES],
    k: &[u8; BOX_BEFORENMBYTES],
) -> Result<(), ProviderFailure> {
    if buf.len() < BOX_ZEROBYTES {
        return Err(ProviderFailure);
    }
    let (head, body) = buf.split_at_mut(BOX_ZEROBYTES);
    let tag = GenericArray::clone_from_slice(&head[BOX_BOXZEROBYTES..]);
    cipher(k)
        .decrypt_in_place_detached(GenericArray::from_slice(nonce), b"", body, &tag)
        .map_err(|_| ProviderFailure)?;

    head.fill(0);
    Ok(())
}
