//! Token-level entry points.
//!
//! Each operation takes base64 inputs and returns a base64 token. The `_with_rng`
//! variants take an explicit random source; the others draw from the OS.

use tracing::{debug, instrument};

use sigil_core::AppConfig;
use sigil_crypto::{OsRandom, RandomSource};

use crate::builder::{build_identity, build_provisional_identity};
use crate::codec;
use crate::credential::AppCredential;
use crate::error::IdentityResult;
use crate::identity::AnyIdentity;
use crate::legacy::UserToken;
use crate::projection;
use crate::target::Target;
use crate::upgrade;

/// Issue a permanent identity token for `raw_user_id`.
pub fn create_identity(config: &AppConfig, raw_user_id: &str) -> IdentityResult<String> {
    create_identity_with_rng(config, raw_user_id, &OsRandom)
}

#[instrument(skip_all)]
pub fn create_identity_with_rng<R: RandomSource + ?Sized>(
    config: &AppConfig,
    raw_user_id: &str,
    rng: &R,
) -> IdentityResult<String> {
    let credential = AppCredential::from_config(config)?;
    let identity = build_identity(&credential, raw_user_id, rng)?;
    codec::encode(&identity)
}

/// Issue a provisional identity token for an email address or phone number.
pub fn create_provisional_identity(
    config: &AppConfig,
    target: Target,
    value: &str,
) -> IdentityResult<String> {
    create_provisional_identity_with_rng(config, target, value, &OsRandom)
}

#[instrument(skip(config, value, rng))]
pub fn create_provisional_identity_with_rng<R: RandomSource + ?Sized>(
    config: &AppConfig,
    target: Target,
    value: &str,
    rng: &R,
) -> IdentityResult<String> {
    let credential = AppCredential::from_config(config)?;
    let identity = build_provisional_identity(&credential, target, value, rng)?;
    codec::encode(&identity)
}

/// Project any identity token to its shareable form.
pub fn get_public_identity(token: &str) -> IdentityResult<String> {
    let identity = codec::decode_map(token)?;
    let public = projection::to_public(&identity)?;
    debug!(target = %public.target(), "Projected public identity");
    public.encode()
}

/// Rewrite tokens issued in older wire shapes. Current shapes come back
/// byte-identical.
pub fn upgrade_identity(token: &str) -> IdentityResult<String> {
    let mut identity = codec::decode_map(token)?;
    upgrade::upgrade(&mut identity)?;
    codec::encode_map(&identity)
}

/// Turn a legacy user token into a permanent identity token.
#[instrument(skip_all)]
pub fn upgrade_user_token(
    config: &AppConfig,
    raw_user_id: &str,
    user_token: &str,
) -> IdentityResult<String> {
    let credential = AppCredential::from_config(config)?;
    credential.verify()?;
    let token: UserToken = codec::decode(user_token)?;
    let identity = token.upgrade(credential.app_id(), raw_user_id)?;
    codec::encode(&identity)
}

/// Decode a token of any shape.
pub fn decode_identity(token: &str) -> IdentityResult<AnyIdentity> {
    AnyIdentity::decode(token)
}
