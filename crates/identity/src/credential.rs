//! Application credential.
//!
//! The (public id, secret) pair an application uses to issue identities.
//! Lengths are checked when the credential is built; whether the id really
//! derives from the secret is checked by [`AppCredential::verify`], which
//! every issuing operation calls before touching key material.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fmt;
use tracing::warn;
use zeroize::Zeroizing;

use sigil_core::AppConfig;
use sigil_crypto::{
    app_id_matches, app_signature_public_key, derive_app_id, APP_PUBLIC_KEY_SIZE,
    APP_SECRET_SIZE, SIGNATURE_PUBLIC_KEY_SIZE,
};

use crate::error::{IdentityError, IdentityResult};

/// Decoded application credential.
#[derive(Clone)]
pub struct AppCredential {
    app_id: [u8; APP_PUBLIC_KEY_SIZE],
    app_secret: Zeroizing<[u8; APP_SECRET_SIZE]>,
}

impl AppCredential {
    /// Build from raw bytes. Fails on any length other than 32/64.
    pub fn from_bytes(app_id: &[u8], app_secret: &[u8]) -> IdentityResult<Self> {
        let app_id: [u8; APP_PUBLIC_KEY_SIZE] = app_id.try_into().map_err(|_| {
            IdentityError::InvalidAppCredential(format!(
                "app id must be {} bytes, got {}",
                APP_PUBLIC_KEY_SIZE,
                app_id.len()
            ))
        })?;

        if app_secret.len() != APP_SECRET_SIZE {
            return Err(IdentityError::InvalidAppCredential(format!(
                "app secret must be {} bytes, got {}",
                APP_SECRET_SIZE,
                app_secret.len()
            )));
        }
        let mut secret = Zeroizing::new([0u8; APP_SECRET_SIZE]);
        secret.copy_from_slice(app_secret);

        Ok(Self {
            app_id,
            app_secret: secret,
        })
    }

    /// Build from base64 strings.
    pub fn from_base64(app_id_b64: &str, app_secret_b64: &str) -> IdentityResult<Self> {
        let app_id = STANDARD
            .decode(app_id_b64)
            .map_err(|e| IdentityError::InvalidAppCredential(format!("app id: {}", e)))?;
        let app_secret = Zeroizing::new(
            STANDARD
                .decode(app_secret_b64)
                .map_err(|e| IdentityError::InvalidAppCredential(format!("app secret: {}", e)))?,
        );
        Self::from_bytes(&app_id, &app_secret)
    }

    pub fn from_config(config: &AppConfig) -> IdentityResult<Self> {
        Self::from_base64(&config.app_id, &config.app_secret)
    }

    /// Build from a secret alone, deriving the matching id.
    pub fn from_secret(app_secret: &[u8; APP_SECRET_SIZE]) -> Self {
        Self {
            app_id: derive_app_id(app_secret),
            app_secret: Zeroizing::new(*app_secret),
        }
    }

    pub fn app_id(&self) -> &[u8; APP_PUBLIC_KEY_SIZE] {
        &self.app_id
    }

    pub fn app_secret(&self) -> &[u8; APP_SECRET_SIZE] {
        &self.app_secret
    }

    /// The application's long-term signature verification key.
    pub fn signature_public_key(&self) -> [u8; SIGNATURE_PUBLIC_KEY_SIZE] {
        app_signature_public_key(&self.app_secret)
    }

    /// Check that the app id is the one derived from the app secret.
    pub fn verify(&self) -> IdentityResult<()> {
        if app_id_matches(&self.app_id, &self.app_secret) {
            Ok(())
        } else {
            warn!(app_id = %STANDARD.encode(self.app_id), "App secret does not match app id");
            Err(IdentityError::AppCredentialMismatch)
        }
    }
}

impl fmt::Debug for AppCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredential")
            .field("app_id", &STANDARD.encode(self.app_id))
            .field("app_secret", &"<redacted>")
            .finish()
    }
}
