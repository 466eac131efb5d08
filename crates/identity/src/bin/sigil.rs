//! Sigil CLI Tool
//!
//! Issues, projects, upgrades and inspects identity tokens from the command
//! line. Tokens go to stdout, logs and errors to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use sigil_core::{logging, AppConfig, LogFormat};
use sigil_identity::identity::fields;
use sigil_identity::{
    codec, create_identity, create_provisional_identity, get_public_identity, upgrade_identity,
    upgrade_user_token, verify_delegation, AnyIdentity, AppCredential, Target,
};

const PRIVATE_FIELDS: [&str; 4] = [
    fields::EPHEMERAL_PRIVATE_SIGNATURE_KEY,
    fields::USER_SECRET,
    fields::PRIVATE_ENCRYPTION_KEY,
    fields::PRIVATE_SIGNATURE_KEY,
];

/// Sigil identity tool
#[derive(Parser, Debug)]
#[command(name = "sigil")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with `app_id` and `app_secret`; defaults to SIGIL_APP_ID / SIGIL_APP_SECRET
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log format (pretty, json)
    #[arg(long, env = "SIGIL_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a permanent identity
    Create {
        #[arg(long)]
        user_id: String,
    },
    /// Issue a provisional identity for an email address or phone number
    CreateProvisional {
        /// email or phone_number
        #[arg(long)]
        target: Target,
        #[arg(long)]
        value: String,
    },
    /// Print the public form of a token
    Public { token: String },
    /// Rewrite a token issued in an older wire shape
    Upgrade { token: String },
    /// Convert a legacy user token into a permanent identity
    UpgradeUserToken {
        #[arg(long)]
        user_id: String,
        token: String,
    },
    /// Show the content of a token with private fields redacted
    Inspect { token: String },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => AppConfig::from_env().context("No --config given and environment not set"),
    }
}

fn cmd_inspect(token: &str, config: Option<&PathBuf>) -> Result<()> {
    let identity = AnyIdentity::decode(token).context("Failed to decode identity")?;

    let mut redacted = codec::decode_map(token)?;
    for field in PRIVATE_FIELDS {
        if let Some(value) = redacted.get_mut(field) {
            *value = Value::String("<redacted>".to_string());
        }
    }
    println!("{}", serde_json::to_string_pretty(&redacted)?);
    println!("shape: {}", shape_name(&identity));

    if let AnyIdentity::Permanent(permanent) = &identity {
        let credential = load_config(config)
            .and_then(|c| AppCredential::from_config(&c).map_err(anyhow::Error::from));
        match credential {
            Ok(credential) => {
                let valid = verify_delegation(&credential.signature_public_key(), permanent);
                println!("delegation: {}", if valid { "valid" } else { "INVALID" });
            }
            Err(e) => debug!(error = %e, "No credential, skipping delegation check"),
        }
    }

    Ok(())
}

fn shape_name(identity: &AnyIdentity) -> &'static str {
    match identity {
        AnyIdentity::Permanent(_) => "permanent",
        AnyIdentity::PublicPermanent(_) => "public permanent",
        AnyIdentity::Provisional(_) => "provisional",
        AnyIdentity::PublicProvisional(_) => "public provisional",
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.config.as_ref();

    match args.command {
        Command::Create { user_id } => {
            let config = load_config(config)?;
            println!("{}", create_identity(&config, &user_id)?);
        }
        Command::CreateProvisional { target, value } => {
            let config = load_config(config)?;
            println!("{}", create_provisional_identity(&config, target, &value)?);
        }
        Command::Public { token } => println!("{}", get_public_identity(&token)?),
        Command::Upgrade { token } => println!("{}", upgrade_identity(&token)?),
        Command::UpgradeUserToken { user_id, token } => {
            let config = load_config(config)?;
            println!("{}", upgrade_user_token(&config, &user_id, &token)?);
        }
        Command::Inspect { token } => cmd_inspect(&token, config)?,
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::try_init(args.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
