//! Shared plumbing for the Sigil identity workspace.
//!
//! This crate holds the pieces every other Sigil crate leans on but that carry
//! no identity semantics of their own:
//!
//! - **Configuration**: the base64 application credential, loaded from TOML or
//!   the process environment
//! - **Logging**: `tracing` subscriber initialisation with text or JSON output
//! - **Errors**: the core error type returned by the loaders above

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, ENV_APP_ID, ENV_APP_SECRET};
pub use error::{CoreError, CoreResult};
pub use logging::LogFormat;
