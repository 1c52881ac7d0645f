use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Decode hex text (surrounding whitespace ignored) into exactly `N` bytes.
pub fn decode_exact<const N: usize>(text: &str, what: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(text.trim()).with_context(|| format!("invalid hex for {what}"))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow!("wrong length for {what}: got {len} bytes, expected {N}"))
}

pub fn load_hex<const N: usize>(path: &Path) -> Result<[u8; N]> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    decode_exact(&text, &path.display().to_string())
}

pub fn save_hex(path: &Path, bytes: &[u8], secret: bool) -> Result<()> {
    fs::write(path, hex::encode(bytes))
        .with_context(|| format!("failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if secret { 0o600 } else { 0o644 };
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = secret;

    Ok(())
}

/// Read a whole input; `-` is stdin.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf).context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write a whole output; `-` is stdout.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if path == Path::new("-") {
        let mut out = io::stdout().lock();
        out.write_all(bytes).context("failed to write stdout")?;
        return out.flush().context("failed to flush stdout");
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
