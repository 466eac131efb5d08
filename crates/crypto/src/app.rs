//! Application id derivation.
//!
//! An application secret is a 64-byte Ed25519 private key (`seed || public`).
//! Its public id is the hash of the trust chain creation block that would
//! register that public key: `nature (1) || author (32 zero bytes) || public key`.

use subtle::ConstantTimeEq;

use crate::hashing::{generic_hash, HASH_SIZE};

/// Length of an application public id, in bytes.
pub const APP_PUBLIC_KEY_SIZE: usize = 32;

/// Length of an application secret, in bytes.
pub const APP_SECRET_SIZE: usize = 64;

const APP_CREATION_NATURE: u8 = 1;
const AUTHOR_SIZE: usize = 32;

/// The Ed25519 public signing key embedded in the last half of `app_secret`.
pub fn app_signature_public_key(app_secret: &[u8; APP_SECRET_SIZE]) -> [u8; APP_PUBLIC_KEY_SIZE] {
    let mut public_key = [0u8; APP_PUBLIC_KEY_SIZE];
    public_key.copy_from_slice(&app_secret[APP_SECRET_SIZE - APP_PUBLIC_KEY_SIZE..]);
    public_key
}

/// Derive the application public id from its secret.
pub fn derive_app_id(app_secret: &[u8; APP_SECRET_SIZE]) -> [u8; HASH_SIZE] {
    let mut payload = [0u8; 1 + AUTHOR_SIZE + APP_PUBLIC_KEY_SIZE];
    payload[0] = APP_CREATION_NATURE;
    payload[1 + AUTHOR_SIZE..].copy_from_slice(&app_signature_public_key(app_secret));
    generic_hash(&payload)
}

/// Whether `app_id` is the id derived from `app_secret`, compared in constant time.
pub fn app_id_matches(app_id: &[u8; APP_PUBLIC_KEY_SIZE], app_secret: &[u8; APP_SECRET_SIZE]) -> bool {
    derive_app_id(app_secret)[..].ct_eq(&app_id[..]).into()
}
