//! Non-interactive SMTP configuration
//!
//! Lets an operator set outbound mail from a script or SSH session without
//! walking the whole wizard. The password is prompted for, never passed on
//! the command line.

use clap::Args;

use crate::error::{SetupError, SetupResult};
use crate::models::{SmtpAuth, SmtpConfig, DEFAULT_SMTP_PORT};
use crate::services::{MailService, SpoolMailer};
use crate::storage::Storage;

use super::resolve_session;
use crate::config::SessionStore;

/// Arguments for the smtp command
#[derive(Args)]
pub struct SmtpArgs {
    /// SMTP relay hostname
    #[arg(long)]
    pub hostname: String,

    /// SMTP relay port
    #[arg(long, default_value_t = DEFAULT_SMTP_PORT)]
    pub port: u16,

    /// Username for the relay (password is prompted for)
    #[arg(long)]
    pub username: Option<String>,

    /// Return address stamped on outgoing mail
    #[arg(long)]
    pub return_address: String,

    /// One-time setup token (defaults to this machine's stored session)
    #[arg(long)]
    pub token: Option<String>,
}

/// Handle the smtp command
pub fn handle_smtp_command(
    storage: &Storage,
    session_store: &SessionStore,
    args: SmtpArgs,
) -> SetupResult<()> {
    let session = resolve_session(storage, session_store, args.token.as_deref())?;

    let auth = match args.username {
        Some(username) => {
            let pass = rpassword::prompt_password("SMTP password: ")
                .map_err(|e| SetupError::Io(format!("Failed to read password: {}", e)))?;
            SmtpAuth {
                user: username,
                pass,
            }
        }
        None => SmtpAuth::default(),
    };

    let config = SmtpConfig {
        hostname: args.hostname,
        port: args.port,
        auth,
        return_address: args.return_address,
    };

    let mailer = SpoolMailer::new(storage.paths().outbox_dir());
    MailService::new(storage, &mailer).set_smtp_config(&session, config)?;

    println!("Outbound mail configuration saved.");
    Ok(())
}
