//! Crypto error type.

use secretlink_core::{AppError, ErrorKind};
use thiserror::Error;

/// Failures raised by the codec, keyring, and token generator.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// No key is held for the requested version.
    #[error("unknown key version {0}")]
    UnknownKeyVersion(u32),
    /// Ciphertext or nonce has an impossible length.
    #[error("malformed ciphertext")]
    MalformedCiphertext,
    /// The authentication tag did not verify.
    #[error("authentication failure")]
    AuthenticationFailure,
    /// AES-256-GCM encryption failed.
    #[error("encryption failed")]
    SealFailed,
    /// Configured key material is unusable.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// The system random source failed.
    #[error("random source unavailable")]
    Random,
}

impl From<CryptoError> for AppError {
    fn from(err: CryptoError) -> Self {
        let kind = match err {
            CryptoError::InvalidKey(_) => ErrorKind::Configuration,
            _ => ErrorKind::Crypto,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
