//! Legacy user tokens.
//!
//! Before identities carried their target, deployments issued a bare user
//! token keyed by `user_id`. Such a token maps one to one onto a permanent
//! identity once the raw user id is known again.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use sigil_crypto::{
    hash_user_id, APP_PUBLIC_KEY_SIZE, OBFUSCATED_USER_ID_SIZE, SIGNATURE_PRIVATE_KEY_SIZE,
    SIGNATURE_PUBLIC_KEY_SIZE, SIGNATURE_SIZE, USER_SECRET_SIZE,
};

use crate::error::{IdentityError, IdentityResult};
use crate::identity::{PermanentIdentity, PublicIdentity};
use crate::serde_helpers::{base64_array, base64_secret};
use crate::target::Target;

/// Legacy user token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    #[serde(with = "base64_array")]
    pub delegation_signature: [u8; SIGNATURE_SIZE],
    #[serde(with = "base64_array")]
    pub ephemeral_public_signature_key: [u8; SIGNATURE_PUBLIC_KEY_SIZE],
    #[serde(with = "base64_secret")]
    pub ephemeral_private_signature_key: Zeroizing<[u8; SIGNATURE_PRIVATE_KEY_SIZE]>,
    #[serde(with = "base64_array")]
    pub user_id: [u8; OBFUSCATED_USER_ID_SIZE],
    #[serde(with = "base64_secret")]
    pub user_secret: Zeroizing<[u8; USER_SECRET_SIZE]>,
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserToken")
            .field("user_id", &STANDARD.encode(self.user_id))
            .field("ephemeral_private_signature_key", &"<redacted>")
            .field("user_secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl UserToken {
    /// Convert into the permanent identity of `raw_user_id` under `app_id`.
    ///
    /// Fails with `InvalidIdentity` when the token was issued for another user
    /// or another application. No key material is generated.
    pub fn upgrade(
        self,
        app_id: &[u8; APP_PUBLIC_KEY_SIZE],
        raw_user_id: &str,
    ) -> IdentityResult<PermanentIdentity> {
        let expected = hash_user_id(app_id, raw_user_id);
        if !bool::from(expected[..].ct_eq(&self.user_id[..])) {
            warn!("User token does not belong to the given user id");
            return Err(IdentityError::InvalidIdentity(
                "user token was issued for another user id".to_string(),
            ));
        }

        debug!("Upgraded legacy user token");
        Ok(PermanentIdentity {
            public: PublicIdentity {
                trustchain_id: *app_id,
                target: Target::User,
                value: STANDARD.encode(self.user_id),
            },
            delegation_signature: self.delegation_signature,
            ephemeral_public_signature_key: self.ephemeral_public_signature_key,
            ephemeral_private_signature_key: self.ephemeral_private_signature_key,
            user_secret: self.user_secret,
        })
    }
}
