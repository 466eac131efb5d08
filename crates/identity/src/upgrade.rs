//! Upgrade of tokens issued in older wire shapes.
//!
//! Public email provisional identities used to carry the raw address. They
//! are rewritten to the `hashed_email` shape; every other shape passes
//! through unchanged.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{IdentityError, IdentityResult};
use crate::identity::fields;
use crate::projection::hash_email;
use crate::target::Target;

/// Upgrade a generically decoded identity in place.
///
/// Returns whether anything changed.
pub fn upgrade(identity: &mut Map<String, Value>) -> IdentityResult<bool> {
    // Unknown targets pass through: only the email shape is rewritten
    let is_email = match identity.get(fields::TARGET) {
        Some(Value::String(target)) => target == Target::Email.as_str(),
        Some(other) => {
            return Err(IdentityError::InvalidIdentity(format!(
                "target must be a string, got {}",
                other
            )))
        }
        None => {
            return Err(IdentityError::InvalidIdentity(
                "missing target field".to_string(),
            ))
        }
    };
    let is_private = identity.contains_key(fields::PRIVATE_SIGNATURE_KEY)
        || identity.contains_key(fields::PRIVATE_ENCRYPTION_KEY);
    if !is_email || is_private {
        return Ok(false);
    }

    let hashed = match identity.get(fields::VALUE) {
        Some(Value::String(email)) => STANDARD.encode(hash_email(email)),
        Some(other) => {
            return Err(IdentityError::InvalidIdentity(format!(
                "email value must be a string, got {}",
                other
            )))
        }
        None => {
            return Err(IdentityError::InvalidIdentity(
                "email identity has no value".to_string(),
            ))
        }
    };

    identity.insert(
        fields::TARGET.to_string(),
        Value::String(Target::HashedEmail.to_string()),
    );
    identity.insert(fields::VALUE.to_string(), Value::String(hashed));
    debug!("Upgraded public email identity to hashed_email");
    Ok(true)
}
