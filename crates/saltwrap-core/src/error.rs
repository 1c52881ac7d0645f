use thiserror::Error;

/// Error returned by every `CryptoLayer` operation.
///
/// Exactly two kinds. `Capacity` is raised before the provider is
/// called and nothing has been written. `Failure` covers everything the
/// provider rejects and deliberately does not say why, so a caller cannot
/// tell a forged tag from a corrupted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("buffer too small: need {required} bytes, got {actual}")]
    Capacity { required: usize, actual: usize },

    #[error("cryptographic operation failed")]
    Failure,
}

impl CryptoError {
    /// C-style status code: always nonzero for an error.
    pub fn status(&self) -> i32 {
        -1
    }

    pub(crate) fn check_capacity(required: usize, actual: usize) -> Result<(), CryptoError> {
        if actual < required {
            return Err(CryptoError::Capacity { required, actual });
        }
        Ok(())
    }
}

/// Opaque failure reported by a `CryptoProvider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("provider failure")]
pub struct ProviderFailure;

impl From<ProviderFailure> for CryptoError {
    fn from(_: ProviderFailure) -> Self {
        CryptoError::Failure
    }
}

/// Map a `Result` to the `0 / nonzero` status convention.
pub fn status_of<T>(result: &Result<T, CryptoError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.status(),
    }
}
