//! Error types for Sigil identity operations.
//!
//! Every public operation fails with one of the variants below and never
//! returns a partial token. Nothing is retried internally.

use sigil_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur in identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Token is not base64, not JSON, or lacks a field its shape requires
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// App id or app secret is not base64 or has the wrong length
    #[error("Invalid app credential: {0}")]
    InvalidAppCredential(String),

    /// App id is not the id derived from the app secret
    #[error("App secret and app id mismatch")]
    AppCredentialMismatch,

    /// Target is unknown or not accepted by the requested operation
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),

    /// Token decodes but lacks what the requested operation needs
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Entropy source exhausted or unavailable
    #[error("Random source failure: {0}")]
    RandomSourceFailure(String),
}

impl From<CryptoError> for IdentityError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::RandomSource(reason) => Self::RandomSourceFailure(reason),
            CryptoError::InvalidKey(reason) => Self::InvalidAppCredential(reason),
        }
    }
}

impl From<base64::DecodeError> for IdentityError {
    fn from(err: base64::DecodeError) -> Self {
        Self::MalformedInput(format!("invalid base64: {}", err))
    }
}

/// Result type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
