use std::sync::atomic::Ordering;

use crate::constants::{BOX_BOXZEROBYTES, BOX_ZEROBYTES, SIGN_BYTES};
use crate::crypto::test_provider::MockProvider;
use crate::crypto::{CryptoLayer, Nonce, SignSeed};
use crate::error::CryptoError;

fn layer() -> CryptoLayer<MockProvider> {
    CryptoLayer::new(MockProvider::default())
}

fn padded(message: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; BOX_ZEROBYTES + message.len()];
    buf[BOX_ZEROBYTES..].copy_from_slice(message);
    buf
}

#[test]
fn precompute_is_symmetric_between_peers() {
    let l = layer();
    let (pk_a, sk_a) = l.generate_box_keypair().unwrap();
    let (pk_b, sk_b) = l.generate_box_keypair().unwrap();
    assert_ne!(pk_a, pk_b);

    let k_ab = l.box_precompute(&pk_b, &sk_a).unwrap();
    let k_ba = l.box_precompute(&pk_a, &sk_b).unwrap();
    assert_eq!(k_ab, k_ba);
}

#[test]
fn box_round_trip_through_layer() {
    let l = layer();
    let (pk_a, sk_a) = l.generate_box_keypair().unwrap();
    let (pk_b, sk_b) = l.generate_box_keypair().unwrap();
    let k_send = l.box_precompute(&pk_b, &sk_a).unwrap();
    let k_recv = l.box_precompute(&pk_a, &sk_b).unwrap();
    let nonce = Nonce([3u8; 24]);

    let plain = padded(b"hello box");
    let mut cipher = vec![0u8; plain.len()];
    l.box_encrypt(&mut cipher, &plain, &nonce, &k_send).unwrap();
    assert!(cipher[..BOX_BOXZEROBYTES].iter().all(|&b| b == 0));

    let mut opened = vec![0u8; cipher.len()];
    l.box_decrypt(&mut opened, &cipher, &nonce, &k_recv).unwrap();
    assert_eq!(opened, plain);
}

#[test]
fn box_in_place_matches_two_buffer_output() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let nonce = Nonce([1u8; 24]);

    for len in [0usize, 1, 15, 16, 17, 100] {
        let message: Vec<u8> = (0..len as u8).collect();
        let plain = padded(&message);

        let mut separate = vec![0u8; plain.len()];
        l.box_encrypt(&mut separate, &plain, &nonce, &key).unwrap();

        let mut in_place = plain.clone();
        l.box_encrypt_in_place(&mut in_place, &nonce, &key).unwrap();
        assert_eq!(separate, in_place, "len={len}");

        l.box_decrypt_in_place(&mut in_place, &nonce, &key).unwrap();
        assert_eq!(in_place, plain, "len={len}");
    }
}

#[test]
fn box_rejects_buffers_shorter_than_padding_without_delegating() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let nonce = Nonce([1u8; 24]);
    let mut short = vec![0u8; BOX_ZEROBYTES - 1];

    let err = l.box_encrypt_in_place(&mut short, &nonce, &key).unwrap_err();
    assert_eq!(
        err,
        CryptoError::Capacity {
            required: BOX_ZEROBYTES,
            actual: BOX_ZEROBYTES - 1
        }
    );
    assert_eq!(l.box_decrypt_in_place(&mut short, &nonce, &key), Err(CryptoError::Failure));

    let mut out = vec![0u8; BOX_ZEROBYTES];
    assert_eq!(l.box_decrypt(&mut out, &short, &nonce, &key), Err(CryptoError::Failure));
    assert_eq!(l.provider().calls(), 0);
}

#[test]
fn box_decrypt_output_shortfall_is_still_a_capacity_error() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let sealed = vec![0u8; BOX_ZEROBYTES + 4];
    let mut out = vec![0u8; sealed.len() - 1];

    assert_eq!(
        l.box_decrypt(&mut out, &sealed, &Nonce([1u8; 24]), &key),
        Err(CryptoError::Capacity {
            required: sealed.len(),
            actual: sealed.len() - 1
        })
    );
    assert_eq!(l.provider().calls(), 0);
}

#[test]
fn box_output_capacity_is_checked_before_delegating() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let nonce = Nonce([1u8; 24]);
    let plain = padded(b"abc");
    let mut out = vec![0x77u8; plain.len() - 1];

    let err = l.box_encrypt(&mut out, &plain, &nonce, &key).unwrap_err();
    assert_eq!(
        err,
        CryptoError::Capacity {
            required: plain.len(),
            actual: plain.len() - 1
        }
    );
    assert!(out.iter().all(|&b| b == 0x77));
    assert_eq!(l.provider().calls(), 0);
}

#[test]
fn box_encrypt_writes_only_the_input_length() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let nonce = Nonce([1u8; 24]);
    let plain = padded(b"abc");
    let mut out = vec![0x77u8; plain.len() + 8];

    l.box_encrypt(&mut out, &plain, &nonce, &key).unwrap();
    assert!(out[plain.len()..].iter().all(|&b| b == 0x77));
}

#[test]
fn box_encrypt_normalizes_dirty_padding() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let nonce = Nonce([1u8; 24]);

    let clean = padded(b"payload");
    let mut dirty = clean.clone();
    dirty[..BOX_ZEROBYTES].fill(0xff);

    let mut from_clean = vec![0u8; clean.len()];
    let mut from_dirty = vec![0u8; dirty.len()];
    l.box_encrypt(&mut from_clean, &clean, &nonce, &key).unwrap();
    l.box_encrypt(&mut from_dirty, &dirty, &nonce, &key).unwrap();
    assert_eq!(from_clean, from_dirty);
}

#[test]
fn box_decrypt_failure_wipes_output() {
    let l = layer();
    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let nonce = Nonce([1u8; 24]);

    let mut cipher = padded(b"secret");
    l.box_encrypt_in_place(&mut cipher, &nonce, &key).unwrap();
    let last = cipher.len() - 1;
    cipher[last] ^= 0x01;

    let mut out = vec![0x55u8; cipher.len()];
    assert_eq!(l.box_decrypt(&mut out, &cipher, &nonce, &key), Err(CryptoError::Failure));
    assert!(out.iter().all(|&b| b == 0));

    assert_eq!(l.box_decrypt_in_place(&mut cipher, &nonce, &key), Err(CryptoError::Failure));
    assert!(cipher.iter().all(|&b| b == 0));
}

#[test]
fn provider_failure_collapses_to_failure() {
    let l = layer();
    l.provider().set_fail(true);

    assert_eq!(l.generate_box_keypair().unwrap_err(), CryptoError::Failure);
    assert_eq!(l.generate_signing_keypair().unwrap_err(), CryptoError::Failure);
    assert_eq!(l.hash_oneshot(b"x").unwrap_err(), CryptoError::Failure);

    let key = crate::crypto::SymmetricKey::from_bytes([9u8; 32]);
    let mut buf = padded(b"plaintext");
    assert_eq!(
        l.box_encrypt_in_place(&mut buf, &Nonce([0; 24]), &key),
        Err(CryptoError::Failure)
    );
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn sign_reports_signed_length_and_opens() {
    let l = layer();
    let (pk, sk) = l.signing_keypair_from_seed(&SignSeed::from_bytes([4u8; 32])).unwrap();

    let mut signed = [0u8; 4 + SIGN_BYTES];
    let signed_len = l.sign(&mut signed, b"abcd", &sk).unwrap();
    assert_eq!(signed_len, 4 + SIGN_BYTES);
    assert_eq!(&signed[SIGN_BYTES..], b"abcd");

    let mut out = [0u8; 4 + SIGN_BYTES];
    let n = l.verify_and_open(&mut out, &signed, &pk).unwrap();
    assert_eq!(&out[..n], b"abcd");
}

#[test]
fn sign_in_place_writes_only_the_reserved_prefix() {
    let l = layer();
    let (pk, sk) = l.generate_signing_keypair().unwrap();
    let message = b"reserved prefix";

    let mut buf = vec![0u8; SIGN_BYTES + message.len()];
    buf[SIGN_BYTES..].copy_from_slice(message);
    let n = l.sign_in_place(&mut buf, &sk).unwrap();
    assert_eq!(n, buf.len());
    assert_eq!(&buf[SIGN_BYTES..], message);

    let mut separate = vec![0u8; SIGN_BYTES + message.len()];
    l.sign(&mut separate, message, &sk).unwrap();
    assert_eq!(buf, separate);

    let detached = l.sign_detached(message, &sk).unwrap();
    assert_eq!(&buf[..SIGN_BYTES], &detached.0[..]);
    l.verify_detached(&detached, message, &pk).unwrap();
}

#[test]
fn sign_capacity_errors() {
    let l = layer();
    let (_, sk) = l.generate_signing_keypair().unwrap();
    let calls = l.provider().calls();

    let mut small = [0u8; SIGN_BYTES + 3];
    assert_eq!(
        l.sign(&mut small, b"abcd", &sk),
        Err(CryptoError::Capacity {
            required: SIGN_BYTES + 4,
            actual: SIGN_BYTES + 3
        })
    );

    let mut no_room = [0u8; SIGN_BYTES - 1];
    assert!(matches!(
        l.sign_in_place(&mut no_room, &sk),
        Err(CryptoError::Capacity { .. })
    ));
    assert_eq!(l.provider().calls(), calls);
}

#[test]
fn verify_and_open_requires_room_for_whole_signed_message() {
    let l = layer();
    let (pk, sk) = l.generate_signing_keypair().unwrap();
    let mut signed = [0u8; 4 + SIGN_BYTES];
    l.sign(&mut signed, b"abcd", &sk).unwrap();

    // Four bytes would hold the message, but the contract asks for signed.len().
    let mut out = [0u8; 4];
    assert_eq!(
        l.verify_and_open(&mut out, &signed, &pk),
        Err(CryptoError::Capacity {
            required: signed.len(),
            actual: 4
        })
    );
}

#[test]
fn verify_and_open_rejects_short_and_forged_input() {
    let l = layer();
    let (pk, sk) = l.generate_signing_keypair().unwrap();

    let mut out = [0u8; 128];
    assert_eq!(
        l.verify_and_open(&mut out, &[0u8; SIGN_BYTES - 1], &pk),
        Err(CryptoError::Failure)
    );

    let mut signed = [0u8; 4 + SIGN_BYTES];
    l.sign(&mut signed, b"abcd", &sk).unwrap();
    signed[SIGN_BYTES] ^= 0x20;

    let mut out = [0u8; 4 + SIGN_BYTES];
    assert_eq!(l.verify_and_open(&mut out, &signed, &pk), Err(CryptoError::Failure));
    assert!(out.iter().all(|&b| b == 0), "provider scribbles must be wiped");
}

#[test]
fn verify_and_open_normalizes_misreported_length() {
    let l = layer();
    let (pk, sk) = l.generate_signing_keypair().unwrap();
    let mut signed = [0u8; 4 + SIGN_BYTES];
    l.sign(&mut signed, b"abcd", &sk).unwrap();

    l.provider().misreport_open_len.store(true, Ordering::SeqCst);
    let mut out = [0u8; 4 + SIGN_BYTES];
    assert_eq!(l.verify_and_open(&mut out, &signed, &pk), Err(CryptoError::Failure));
}

#[test]
fn signing_and_box_keys_are_distinct_types() {
    let l = layer();
    let (box_pk, _) = l.generate_box_keypair().unwrap();
    let (sign_pk, _) = l.generate_signing_keypair().unwrap();
    // Different newtypes; only the raw bytes can be compared.
    assert_eq!(box_pk.0.len(), sign_pk.0.len());
}

mod capacity_props {
    use proptest::prelude::*;

    use super::{layer, padded};
    use crate::constants::SIGN_BYTES;
    use crate::crypto::{Nonce, SignSeed, SymmetricKey};
    use crate::error::CryptoError;

    proptest! {
        #[test]
        fn short_box_output_never_reaches_provider(msg_len in 0usize..200, short_by in 1usize..32) {
            let l = layer();
            let plain = padded(&vec![0x61; msg_len]);
            let out_len = plain.len().saturating_sub(short_by);
            let mut out = vec![0x77u8; out_len];

            let err = l
                .box_encrypt(&mut out, &plain, &Nonce([0u8; 24]), &SymmetricKey::from_bytes([1u8; 32]))
                .unwrap_err();
            prop_assert_eq!(err, CryptoError::Capacity { required: plain.len(), actual: out_len });
            prop_assert_eq!(l.provider().calls(), 0);
            prop_assert!(out.iter().all(|&b| b == 0x77));
        }

        #[test]
        fn short_sign_output_never_reaches_provider(msg_len in 0usize..200, short_by in 1usize..=SIGN_BYTES) {
            let l = layer();
            let (_, sk) = l.signing_keypair_from_seed(&SignSeed::from_bytes([3u8; 32])).unwrap();
            let before = l.provider().calls();

            let message = vec![0x62u8; msg_len];
            let out_len = msg_len + SIGN_BYTES - short_by;
            let mut out = vec![0u8; out_len];
            let err = l.sign(&mut out, &message, &sk).unwrap_err();
            prop_assert_eq!(err, CryptoError::Capacity { required: msg_len + SIGN_BYTES, actual: out_len });
            prop_assert_eq!(l.provider().calls(), before);
        }
    }
}
