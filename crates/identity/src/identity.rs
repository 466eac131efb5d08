//! Identity records.
//!
//! Records compose rather than extend: every private shape holds its public
//! shape as a flattened field, so the JSON stays flat while the Rust types
//! keep the public/private split explicit.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use zeroize::Zeroizing;

use sigil_crypto::{
    APP_PUBLIC_KEY_SIZE, ENCRYPTION_PRIVATE_KEY_SIZE, ENCRYPTION_PUBLIC_KEY_SIZE,
    SIGNATURE_PRIVATE_KEY_SIZE, SIGNATURE_PUBLIC_KEY_SIZE, SIGNATURE_SIZE, USER_SECRET_SIZE,
};

use crate::codec;
use crate::error::{IdentityError, IdentityResult};
use crate::serde_helpers::{base64_array, base64_secret};
use crate::target::Target;

/// Wire field names.
pub mod fields {
    pub const TRUSTCHAIN_ID: &str = "trustchain_id";
    pub const TARGET: &str = "target";
    pub const VALUE: &str = "value";
    pub const DELEGATION_SIGNATURE: &str = "delegation_signature";
    pub const EPHEMERAL_PUBLIC_SIGNATURE_KEY: &str = "ephemeral_public_signature_key";
    pub const EPHEMERAL_PRIVATE_SIGNATURE_KEY: &str = "ephemeral_private_signature_key";
    pub const USER_SECRET: &str = "user_secret";
    pub const PUBLIC_ENCRYPTION_KEY: &str = "public_encryption_key";
    pub const PRIVATE_ENCRYPTION_KEY: &str = "private_encryption_key";
    pub const PUBLIC_SIGNATURE_KEY: &str = "public_signature_key";
    pub const PRIVATE_SIGNATURE_KEY: &str = "private_signature_key";
}

/// Fields shared by every identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    /// Application public id
    #[serde(with = "base64_array")]
    pub trustchain_id: [u8; APP_PUBLIC_KEY_SIZE],
    pub target: Target,
    /// Base64 obfuscated user id, raw contact value, or contact hash
    pub value: String,
}

/// Identity of a registered user. Held only by that user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanentIdentity {
    #[serde(flatten)]
    pub public: PublicIdentity,
    /// App signature over `ephemeral_public_signature_key || obfuscated user id`
    #[serde(with = "base64_array")]
    pub delegation_signature: [u8; SIGNATURE_SIZE],
    #[serde(with = "base64_array")]
    pub ephemeral_public_signature_key: [u8; SIGNATURE_PUBLIC_KEY_SIZE],
    #[serde(with = "base64_secret")]
    pub ephemeral_private_signature_key: Zeroizing<[u8; SIGNATURE_PRIVATE_KEY_SIZE]>,
    #[serde(with = "base64_secret")]
    pub user_secret: Zeroizing<[u8; USER_SECRET_SIZE]>,
}

/// Shareable half of a provisional identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicProvisionalIdentity {
    #[serde(flatten)]
    pub public: PublicIdentity,
    #[serde(with = "base64_array")]
    pub public_signature_key: [u8; SIGNATURE_PUBLIC_KEY_SIZE],
    #[serde(with = "base64_array")]
    pub public_encryption_key: [u8; ENCRYPTION_PUBLIC_KEY_SIZE],
}

/// Identity issued for a contact that has not registered yet.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalIdentity {
    #[serde(flatten)]
    pub public: PublicProvisionalIdentity,
    #[serde(with = "base64_secret")]
    pub private_signature_key: Zeroizing<[u8; SIGNATURE_PRIVATE_KEY_SIZE]>,
    #[serde(with = "base64_secret")]
    pub private_encryption_key: Zeroizing<[u8; ENCRYPTION_PRIVATE_KEY_SIZE]>,
}

impl PermanentIdentity {
    pub fn target(&self) -> Target {
        self.public.target
    }

    /// Private fields stripped; the obfuscated id is already safe to share.
    pub fn to_public(&self) -> PublicIdentity {
        self.public.clone()
    }
}

impl ProvisionalIdentity {
    pub fn target(&self) -> Target {
        self.public.public.target
    }

    pub fn value(&self) -> &str {
        &self.public.public.value
    }
}

impl PublicProvisionalIdentity {
    pub fn target(&self) -> Target {
        self.public.target
    }
}

impl fmt::Debug for PermanentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermanentIdentity")
            .field("public", &self.public)
            .field("ephemeral_public_signature_key", &self.ephemeral_public_signature_key)
            .field("ephemeral_private_signature_key", &"<redacted>")
            .field("user_secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ProvisionalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionalIdentity")
            .field("public", &self.public)
            .field("private_signature_key", &"<redacted>")
            .field("private_encryption_key", &"<redacted>")
            .finish()
    }
}

/// Any decoded identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyIdentity {
    Permanent(PermanentIdentity),
    PublicPermanent(PublicIdentity),
    Provisional(ProvisionalIdentity),
    PublicProvisional(PublicProvisionalIdentity),
}

/// Any shareable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyPublicIdentity {
    Permanent(PublicIdentity),
    Provisional(PublicProvisionalIdentity),
}

/// Read and parse the `target` of a generically decoded token.
pub(crate) fn read_target(identity: &Map<String, Value>) -> IdentityResult<Target> {
    match identity.get(fields::TARGET) {
        None => Err(IdentityError::InvalidIdentity(
            "missing target field".to_string(),
        )),
        Some(Value::String(target)) => target.parse(),
        Some(other) => Err(IdentityError::InvalidIdentity(format!(
            "target must be a string, got {}",
            other
        ))),
    }
}

/// Deserialize a generic token into a typed shape; a missing or mistyped
/// field becomes whatever error `on_error` builds.
pub(crate) fn typed<T, F>(identity: &Map<String, Value>, on_error: F) -> IdentityResult<T>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(String) -> IdentityError,
{
    serde_json::from_value(Value::Object(identity.clone())).map_err(|e| on_error(e.to_string()))
}

impl AnyIdentity {
    /// Decode a token and dispatch on its target and private fields.
    pub fn decode(token: &str) -> IdentityResult<Self> {
        Self::from_map(&codec::decode_map(token)?)
    }

    pub fn from_map(identity: &Map<String, Value>) -> IdentityResult<Self> {
        let target = read_target(identity)?;
        let malformed = IdentityError::MalformedInput;

        if target == Target::User {
            return if identity.contains_key(fields::USER_SECRET) {
                typed(identity, malformed).map(Self::Permanent)
            } else {
                typed(identity, malformed).map(Self::PublicPermanent)
            };
        }

        let is_private = identity.contains_key(fields::PRIVATE_SIGNATURE_KEY)
            || identity.contains_key(fields::PRIVATE_ENCRYPTION_KEY);

        match (is_private, target.is_hashed()) {
            (true, true) => Err(IdentityError::InvalidIdentity(format!(
                "{} identity carries private keys",
                target
            ))),
            (true, false) => typed(identity, malformed).map(Self::Provisional),
            (false, _) => typed(identity, malformed).map(Self::PublicProvisional),
        }
    }

    pub fn target(&self) -> Target {
        match self {
            Self::Permanent(identity) => identity.target(),
            Self::PublicPermanent(identity) => identity.target,
            Self::Provisional(identity) => identity.target(),
            Self::PublicProvisional(identity) => identity.target(),
        }
    }

    pub fn public_identity(&self) -> &PublicIdentity {
        match self {
            Self::Permanent(identity) => &identity.public,
            Self::PublicPermanent(identity) => identity,
            Self::Provisional(identity) => &identity.public.public,
            Self::PublicProvisional(identity) => &identity.public,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Self::Permanent(_) | Self::Provisional(_))
    }

    pub fn encode(&self) -> IdentityResult<String> {
        match self {
            Self::Permanent(identity) => codec::encode(identity),
            Self::PublicPermanent(identity) => codec::encode(identity),
            Self::Provisional(identity) => codec::encode(identity),
            Self::PublicProvisional(identity) => codec::encode(identity),
        }
    }
}

impl AnyPublicIdentity {
    pub fn target(&self) -> Target {
        match self {
            Self::Permanent(identity) => identity.target,
            Self::Provisional(identity) => identity.target(),
        }
    }

    pub fn encode(&self) -> IdentityResult<String> {
        match self {
            Self::Permanent(identity) => codec::encode(identity),
            Self::Provisional(identity) => codec::encode(identity),
        }
    }
}
