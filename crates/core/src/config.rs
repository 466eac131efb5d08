//! Configuration management for Sigil.
//!
//! An [`AppConfig`] is the application credential as operators hand it over:
//! two base64 strings. Decoding and length checks belong to the identity
//! crate, this layer only finds the strings.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "file-config")]
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Environment variable holding the base64 application id.
pub const ENV_APP_ID: &str = "SIGIL_APP_ID";

/// Environment variable holding the base64 application secret.
pub const ENV_APP_SECRET: &str = "SIGIL_APP_SECRET";

/// Base64 application credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base64 of the 32-byte application public id
    pub app_id: String,
    /// Base64 of the 64-byte application secret
    pub app_secret: String,
}

impl AppConfig {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Parse a TOML document with top-level `app_id` and `app_secret` keys.
    #[cfg(feature = "file-config")]
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))?;
        config.ensure_present()?;
        Ok(config)
    }

    #[cfg(feature = "file-config")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded app config file");
        Self::from_toml_str(&content)
    }

    /// Read the credential from [`ENV_APP_ID`] and [`ENV_APP_SECRET`].
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the credential from an arbitrary key lookup, using the same
    /// variable names as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = lookup(ENV_APP_ID)
            .ok_or_else(|| CoreError::Config(format!("{} is not set", ENV_APP_ID)))?;
        let app_secret = lookup(ENV_APP_SECRET)
            .ok_or_else(|| CoreError::Config(format!("{} is not set", ENV_APP_SECRET)))?;

        let config = Self::new(app_id.trim(), app_secret.trim());
        config.ensure_present()?;
        Ok(config)
    }

    fn ensure_present(&self) -> CoreResult<()> {
        if self.app_id.is_empty() {
            return Err(CoreError::Config("app_id must not be empty".to_string()));
        }
        if self.app_secret.is_empty() {
            return Err(CoreError::Config("app_secret must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}
