//! Signature and encryption key pairs.
//!
//! Signature keys are Ed25519; the private half is kept in the 64-byte
//! `seed || public` form that identity tokens carry. Encryption keys are
//! X25519 with the private scalar stored already clamped.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};
use crate::random::RandomSource;

/// Ed25519 public key length.
pub const SIGNATURE_PUBLIC_KEY_SIZE: usize = 32;
/// Ed25519 private key length (`seed || public`).
pub const SIGNATURE_PRIVATE_KEY_SIZE: usize = 64;
/// Ed25519 signature length.
pub const SIGNATURE_SIZE: usize = 64;
/// X25519 public key length.
pub const ENCRYPTION_PUBLIC_KEY_SIZE: usize = 32;
/// X25519 private key length.
pub const ENCRYPTION_PRIVATE_KEY_SIZE: usize = 32;

const SEED_SIZE: usize = 32;

/// Ed25519 key pair with the private key zeroized on drop.
pub struct SignatureKeyPair {
    pub public_key: [u8; SIGNATURE_PUBLIC_KEY_SIZE],
    pub private_key: Zeroizing<[u8; SIGNATURE_PRIVATE_KEY_SIZE]>,
}

impl SignatureKeyPair {
    /// Generate a fresh key pair from a random seed.
    pub fn generate<R: RandomSource + ?Sized>(rng: &R) -> CryptoResult<Self> {
        let mut seed = Zeroizing::new([0u8; SEED_SIZE]);
        rng.fill_random(&mut seed[..])?;

        let signing_key = SigningKey::from_bytes(&seed);
        Ok(Self {
            public_key: signing_key.verifying_key().to_bytes(),
            private_key: Zeroizing::new(signing_key.to_keypair_bytes()),
        })
    }
}

/// X25519 key pair with the private key zeroized on drop.
pub struct EncryptionKeyPair {
    pub public_key: [u8; ENCRYPTION_PUBLIC_KEY_SIZE],
    pub private_key: Zeroizing<[u8; ENCRYPTION_PRIVATE_KEY_SIZE]>,
}

impl EncryptionKeyPair {
    /// Generate a fresh key pair from a random, clamped scalar.
    pub fn generate<R: RandomSource + ?Sized>(rng: &R) -> CryptoResult<Self> {
        let mut private_key = Zeroizing::new([0u8; ENCRYPTION_PRIVATE_KEY_SIZE]);
        rng.fill_random(&mut private_key[..])?;

        private_key[0] &= 248;
        private_key[31] &= 127;
        private_key[31] |= 64;

        Ok(Self {
            public_key: x25519(*private_key, X25519_BASEPOINT_BYTES),
            private_key,
        })
    }
}

/// Sign `message` with a 64-byte `seed || public` Ed25519 private key.
///
/// Fails if the public half is not the key derived from the seed.
pub fn sign(
    private_key: &[u8; SIGNATURE_PRIVATE_KEY_SIZE],
    message: &[u8],
) -> CryptoResult<[u8; SIGNATURE_SIZE]> {
    let signing_key = SigningKey::from_keypair_bytes(private_key)
        .map_err(|e| CryptoError::InvalidKey(format!("malformed Ed25519 key pair: {}", e)))?;
    Ok(signing_key.sign(message).to_bytes())
}

/// Verify an Ed25519 signature. Malformed keys verify as false.
pub fn verify(
    public_key: &[u8; SIGNATURE_PUBLIC_KEY_SIZE],
    message: &[u8],
    signature: &[u8; SIGNATURE_SIZE],
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(signature))
        .is_ok()
}
