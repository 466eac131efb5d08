//! Cryptographic primitives for Sigil identities.
//!
//! This crate provides the building blocks the identity layer composes:
//!
//! - **Key Derivation**: application public id from an application secret
//! - **User Secrets**: application-bound user id hashing and check-byte secrets
//! - **Hash Functions**: BLAKE2b, 256-bit and the one-byte check hash
//! - **Key Pairs**: Ed25519 signing and X25519 encryption key generation
//! - **Random Source**: an injectable CSPRNG capability
//!
//! # Security Principles
//!
//! - Never roll custom cryptographic primitives
//! - Secrets must never be logged or hardcoded
//! - Use constant-time operations where secret-dependent comparisons occur
//! - Private key material is zeroized on drop
//! - Random source failures propagate; there is no fallback source

pub mod app;
pub mod error;
pub mod hashing;
pub mod keys;
pub mod random;
pub mod user_secret;

pub use app::{
    app_id_matches, app_signature_public_key, derive_app_id, APP_PUBLIC_KEY_SIZE, APP_SECRET_SIZE,
};
pub use error::{CryptoError, CryptoResult};
pub use hashing::{generic_hash, generic_hash_parts, one_byte_generic_hash, HASH_SIZE};
pub use keys::{
    sign, verify, EncryptionKeyPair, SignatureKeyPair, ENCRYPTION_PRIVATE_KEY_SIZE,
    ENCRYPTION_PUBLIC_KEY_SIZE, SIGNATURE_PRIVATE_KEY_SIZE, SIGNATURE_PUBLIC_KEY_SIZE,
    SIGNATURE_SIZE,
};
pub use random::{OsRandom, RandomSource};
pub use user_secret::{
    check_user_secret, hash_user_id, new_user_secret, OBFUSCATED_USER_ID_SIZE, USER_SECRET_SIZE,
};
