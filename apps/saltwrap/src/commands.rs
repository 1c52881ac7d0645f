use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use saltwrap_core::constants::{
    BOX_BOXZEROBYTES, BOX_MACBYTES, BOX_NONCEBYTES, BOX_PUBLICKEYBYTES, BOX_SECRETKEYBYTES,
    BOX_ZEROBYTES, SIGN_BYTES, SIGN_PUBLICKEYBYTES, SIGN_SECRETKEYBYTES, SIGN_SEEDBYTES,
};
use saltwrap_core::crypto::{
    BoxPublicKey, BoxSecretKey, HashStateBuffer, Nonce, SignPublicKey, SignSecretKey, SignSeed,
    Signature, SymmetricKey,
};
use saltwrap_core::{CryptoLayer, CryptoProvider};

use crate::keyfile::{decode_exact, load_hex, read_input, save_hex, write_output};
use crate::KeyKind;

pub fn keygen<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    kind: KeyKind,
    out_dir: &Path,
    name: &str,
    seed: Option<&Path>,
    force: bool,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    let key_path = out_dir.join(format!("{name}.key"));
    let pub_path = out_dir.join(format!("{name}.pub"));
    if !force && (key_path.exists() || pub_path.exists()) {
        bail!("key files already exist (use --force to overwrite)");
    }

    match kind {
        KeyKind::Box => {
            if seed.is_some() {
                bail!("--seed only applies to signing keys");
            }
            let (pk, sk) = crypto.generate_box_keypair().context("box key generation failed")?;
            save_hex(&key_path, sk.as_bytes(), true)?;
            save_hex(&pub_path, &pk.0, false)?;
        }
        KeyKind::Sign => {
            let (pk, sk) = match seed {
                Some(path) => {
                    let seed = SignSeed::from_bytes(load_hex::<SIGN_SEEDBYTES>(path)?);
                    crypto.signing_keypair_from_seed(&seed)
                }
                None => crypto.generate_signing_keypair(),
            }
            .context("signing key generation failed")?;
            save_hex(&key_path, sk.as_bytes(), true)?;
            save_hex(&pub_path, &pk.0, false)?;
        }
    }

    info!(provider = P::NAME, ?kind, "keypair written");
    println!("generated:");
    println!("  secret: {}", key_path.display());
    println!("  public: {}", pub_path.display());
    Ok(())
}

pub struct BoxArgs<'a> {
    pub secret: &'a Path,
    pub peer: &'a Path,
    pub nonce: &'a str,
    pub input: &'a Path,
    pub output: &'a Path,
}

fn box_key<P: CryptoProvider>(crypto: &CryptoLayer<P>, args: &BoxArgs<'_>) -> Result<SymmetricKey> {
    let secret = BoxSecretKey::from_bytes(load_hex::<BOX_SECRETKEYBYTES>(args.secret)?);
    let peer = BoxPublicKey(load_hex::<BOX_PUBLICKEYBYTES>(args.peer)?);
    crypto
        .box_precompute(&peer, &secret)
        .context("key agreement failed (peer key rejected)")
}

/// Writes `tag || ciphertext`; the leading zero bytes are not transmitted.
pub fn seal<P: CryptoProvider>(crypto: &CryptoLayer<P>, args: BoxArgs<'_>) -> Result<()> {
    let nonce = Nonce(decode_exact::<BOX_NONCEBYTES>(args.nonce, "nonce")?);
    let key = box_key(crypto, &args)?;
    let message = read_input(args.input)?;

    write_output(args.output, &seal_bytes(crypto, &key, &nonce, &message)?)
}

pub fn open<P: CryptoProvider>(crypto: &CryptoLayer<P>, args: BoxArgs<'_>) -> Result<()> {
    let nonce = Nonce(decode_exact::<BOX_NONCEBYTES>(args.nonce, "nonce")?);
    let key = box_key(crypto, &args)?;
    let sealed = read_input(args.input)?;

    write_output(args.output, &open_bytes(crypto, &key, &nonce, &sealed)?)
}

pub fn seal_bytes<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    key: &SymmetricKey,
    nonce: &Nonce,
    message: &[u8],
) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; BOX_ZEROBYTES + message.len()];
    buf[BOX_ZEROBYTES..].copy_from_slice(message);
    crypto.box_encrypt_in_place(&mut buf, nonce, key).context("encryption failed")?;

    buf.drain(..BOX_BOXZEROBYTES);
    Ok(buf)
}

/// Inverse of `seal_bytes`: `sealed` is `tag || ciphertext`.
pub fn open_bytes<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    key: &SymmetricKey,
    nonce: &Nonce,
    sealed: &[u8],
) -> Result<Vec<u8>> {
    if sealed.len() < BOX_MACBYTES {
        bail!(
            "sealed input is {} bytes, shorter than the {BOX_MACBYTES}-byte tag",
            sealed.len()
        );
    }

    let mut buf = vec![0u8; BOX_BOXZEROBYTES + sealed.len()];
    buf[BOX_BOXZEROBYTES..].copy_from_slice(sealed);
    crypto
        .box_decrypt_in_place(&mut buf, nonce, key)
        .context("decryption failed (wrong key, wrong nonce or tampered input)")?;

    buf.drain(..BOX_ZEROBYTES);
    Ok(buf)
}

pub fn sign<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    secret: &Path,
    input: &Path,
    output: &Path,
    detached: bool,
) -> Result<()> {
    let sk = SignSecretKey::from_bytes(load_hex::<SIGN_SECRETKEYBYTES>(secret)?);
    let buf = read_input(input)?;

    if detached {
        let signature = crypto.sign_detached(&buf, &sk).context("signing failed")?;
        return write_output(output, hex::encode(signature.0).as_bytes());
    }

    write_output(output, &sign_bytes(crypto, &sk, buf)?)
}

/// `signature || message`, signed in place over a reserved prefix.
pub fn sign_bytes<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    sk: &SignSecretKey,
    mut buf: Vec<u8>,
) -> Result<Vec<u8>> {
    buf.splice(0..0, [0u8; SIGN_BYTES]);
    let n = crypto.sign_in_place(&mut buf, sk).context("signing failed")?;
    buf.truncate(n);
    Ok(buf)
}

/// Verify `signature || message` and return the message.
pub fn open_signed<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    pk: &SignPublicKey,
    signed: &[u8],
) -> Result<Vec<u8>> {
    let mut out = vec![0u8; signed.len()];
    let n = crypto
        .verify_and_open(&mut out, signed, pk)
        .map_err(|_| anyhow!("signature verification failed"))?;
    out.truncate(n);
    Ok(out)
}

pub fn verify<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    public: &Path,
    input: &Path,
    signature: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let pk = SignPublicKey(load_hex::<SIGN_PUBLICKEYBYTES>(public)?);
    let data = read_input(input)?;

    match signature {
        Some(path) => {
            let sig = Signature(load_hex::<SIGN_BYTES>(path)?);
            crypto
                .verify_detached(&sig, &data, &pk)
                .map_err(|_| anyhow!("signature verification failed"))?;
        }
        None => {
            let message = open_signed(crypto, &pk, &data)?;
            if let Some(path) = output {
                write_output(path, &message)?;
            }
        }
    }

    eprintln!("signature OK");
    Ok(())
}

pub fn hash<P: CryptoProvider>(
    crypto: &CryptoLayer<P>,
    input: &Path,
    chunk_size: Option<usize>,
) -> Result<()> {
    let digest = match chunk_size {
        None => crypto.hash_oneshot(&read_input(input)?)?,
        Some(0) => bail!("--chunk-size must be at least 1"),
        Some(size) => {
            let mut reader: Box<dyn Read> = if input == Path::new("-") {
                Box::new(io::stdin().lock())
            } else {
                let file = File::open(input)
                    .with_context(|| format!("failed to open {}", input.display()))?;
                Box::new(file)
            };

            let mut state = HashStateBuffer::new();
            let mut h = crypto.hash_init(state.as_mut_slice())?;
            let mut chunk = vec![0u8; size];
            loop {
                let n = reader.read(&mut chunk).context("failed to read input")?;
                if n == 0 {
                    break;
                }
                h.update(&chunk[..n])?;
            }
            h.finalize()?
        }
    };

    println!("{}", hex::encode(digest.0));
    Ok(())
}
