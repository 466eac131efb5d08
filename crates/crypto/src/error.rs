//! Error types for Sigil cryptographic operations.

use thiserror::Error;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The random source could not produce the requested bytes
    #[error("Entropy source unavailable: {0}")]
    RandomSource(String),

    /// Key material has the wrong length or does not form a valid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
