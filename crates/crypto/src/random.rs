//! Cryptographic random source.
//!
//! Every operation that needs fresh key material draws it through a
//! [`RandomSource`] handed in by the caller, so a failing or exhausted source
//! surfaces as [`CryptoError::RandomSource`] instead of silently producing
//! weak keys. [`OsRandom`] is the production source.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};

/// A thread-safe provider of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync {
    /// Fill `buf` entirely, or fail without a partial result being used.
    fn fill_random(&self, buf: &mut [u8]) -> CryptoResult<()>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_random(&self, buf: &mut [u8]) -> CryptoResult<()> {
        OsRng.try_fill_bytes(buf).map_err(|e| {
            tracing::warn!(error = %e, "OS random source failed");
            CryptoError::RandomSource(e.to_string())
        })
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill_random(&self, buf: &mut [u8]) -> CryptoResult<()> {
        (**self).fill_random(buf)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn fill_random(&self, buf: &mut [u8]) -> CryptoResult<()> {
        (**self).fill_random(buf)
    }
}
