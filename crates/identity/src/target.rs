//! Identity targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IdentityError;

/// What the `value` of an identity designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Obfuscated user id of a permanent identity
    User,
    /// Raw email address of a provisional identity
    Email,
    /// Raw phone number of a provisional identity
    PhoneNumber,
    /// Hash of an email address
    HashedEmail,
    /// Salted hash of a phone number
    HashedPhoneNumber,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::HashedEmail => "hashed_email",
            Self::HashedPhoneNumber => "hashed_phone_number",
        }
    }

    /// The hashed counterpart of a provisional target. Hashed targets map to
    /// themselves; `user` has no hashed form.
    pub fn hashed(&self) -> Option<Target> {
        match self {
            Self::User => None,
            Self::Email | Self::HashedEmail => Some(Self::HashedEmail),
            Self::PhoneNumber | Self::HashedPhoneNumber => Some(Self::HashedPhoneNumber),
        }
    }

    pub fn is_provisional(&self) -> bool {
        !matches!(self, Self::User)
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Self::HashedEmail | Self::HashedPhoneNumber)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "email" => Ok(Self::Email),
            "phone_number" => Ok(Self::PhoneNumber),
            "hashed_email" => Ok(Self::HashedEmail),
            "hashed_phone_number" => Ok(Self::HashedPhoneNumber),
            other => Err(IdentityError::UnsupportedTarget(other.to_string())),
        }
    }
}
