//! Identity issuance for Sigil applications.
//!
//! An application holding its credential issues self-contained identity tokens
//! for its users. A backend that only knows the application's public signature
//! key can later check that a user was vouched for, without any per-user call.
//!
//! # Identity Shapes
//!
//! - **Permanent**: a registered user, bound to the app by a delegation signature
//! - **Provisional**: an email address or phone number not registered yet
//! - **Public**: either of the above with private keys stripped and contact
//!   values hashed, safe to hand to a server
//!
//! # Token Format
//!
//! Tokens are `base64(json)` with a fixed key order, so identical identities
//! always encode to identical bytes. See [`codec`].
//!
//! # Example
//!
//! ```no_run
//! use sigil_core::AppConfig;
//! use sigil_identity::{create_identity, get_public_identity};
//!
//! # fn main() -> sigil_identity::IdentityResult<()> {
//! let config = AppConfig::from_env().expect("credential in environment");
//! let token = create_identity(&config, "alice")?;
//! let public = get_public_identity(&token)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod builder;
pub mod codec;
pub mod credential;
pub mod error;
pub mod identity;
pub mod legacy;
pub mod projection;
pub mod serde_helpers;
pub mod target;
pub mod upgrade;

pub use api::{
    create_identity, create_identity_with_rng, create_provisional_identity,
    create_provisional_identity_with_rng, decode_identity, get_public_identity, upgrade_identity,
    upgrade_user_token,
};
pub use builder::{build_identity, build_provisional_identity, verify_delegation};
pub use credential::AppCredential;
pub use error::{IdentityError, IdentityResult};
pub use identity::{
    AnyIdentity, AnyPublicIdentity, PermanentIdentity, ProvisionalIdentity, PublicIdentity,
    PublicProvisionalIdentity,
};
pub use legacy::UserToken;
pub use projection::{hash_email, hash_phone_number};
pub use target::Target;
