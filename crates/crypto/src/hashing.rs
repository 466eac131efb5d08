//! BLAKE2b hashing.
//!
//! The identity format fixes BLAKE2b as its hash: 32-byte digests for ids and
//! contact hashes, and a 16-byte digest whose first byte serves as the user
//! secret check byte.

use blake2::digest::consts::{U16, U32};
use blake2::{Blake2b, Digest};

/// Digest length of [`generic_hash`], in bytes.
pub const HASH_SIZE: usize = 32;

type Blake2b256 = Blake2b<U32>;
type Blake2b128 = Blake2b<U16>;

/// 256-bit BLAKE2b of `data`.
pub fn generic_hash(data: &[u8]) -> [u8; HASH_SIZE] {
    Blake2b256::digest(data).into()
}

/// 256-bit BLAKE2b of the concatenation of `parts`, without building the
/// concatenated buffer.
pub fn generic_hash_parts(parts: &[&[u8]]) -> [u8; HASH_SIZE] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(*part);
    }
    hasher.finalize().into()
}

/// First byte of the 128-bit BLAKE2b of the concatenation of `parts`.
pub fn one_byte_generic_hash(parts: &[&[u8]]) -> u8 {
    let mut hasher = Blake2b128::new();
    for part in parts {
        hasher.update(*part);
    }
    hasher.finalize()[0]
}
