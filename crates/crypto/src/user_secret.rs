//! Obfuscated user ids and user secrets.
//!
//! A user secret is 31 random bytes followed by a check byte binding it to the
//! obfuscated user id, so a holder of both can detect a corrupted or truncated
//! secret offline.

use crate::error::CryptoResult;
use crate::hashing::{generic_hash_parts, one_byte_generic_hash, HASH_SIZE};
use crate::random::RandomSource;

/// Length of a user secret, in bytes.
pub const USER_SECRET_SIZE: usize = 32;

/// Length of an obfuscated user id, in bytes.
pub const OBFUSCATED_USER_ID_SIZE: usize = HASH_SIZE;

/// Hash a caller-supplied user id together with the application id.
///
/// The same raw id yields unrelated obfuscated ids in different applications.
pub fn hash_user_id(app_id: &[u8], raw_user_id: &str) -> [u8; OBFUSCATED_USER_ID_SIZE] {
    generic_hash_parts(&[raw_user_id.as_bytes(), app_id])
}

/// Draw a fresh user secret for `obfuscated_user_id`.
pub fn new_user_secret<R: RandomSource + ?Sized>(
    obfuscated_user_id: &[u8; OBFUSCATED_USER_ID_SIZE],
    rng: &R,
) -> CryptoResult<[u8; USER_SECRET_SIZE]> {
    let mut secret = [0u8; USER_SECRET_SIZE];
    rng.fill_random(&mut secret[..USER_SECRET_SIZE - 1])?;
    secret[USER_SECRET_SIZE - 1] = check_byte(&secret[..USER_SECRET_SIZE - 1], obfuscated_user_id);
    Ok(secret)
}

/// Whether the last byte of `user_secret` is the check byte for `obfuscated_user_id`.
pub fn check_user_secret(
    user_secret: &[u8; USER_SECRET_SIZE],
    obfuscated_user_id: &[u8; OBFUSCATED_USER_ID_SIZE],
) -> bool {
    let (random_part, check) = user_secret.split_at(USER_SECRET_SIZE - 1);
    check[0] == check_byte(random_part, obfuscated_user_id)
}

fn check_byte(random_part: &[u8], obfuscated_user_id: &[u8]) -> u8 {
    one_byte_generic_hash(&[random_part, obfuscated_user_id])
}
