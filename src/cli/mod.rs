//! CLI command handlers

pub mod smtp;
pub mod status;
pub mod token;

pub use smtp::{handle_smtp_command, SmtpArgs};
pub use status::handle_status_command;
pub use token::{handle_token_command, TokenCommands};

use crate::config::{SessionStore, SessionToken};
use crate::error::{SetupError, SetupResult};
use crate::services::TokenService;
use crate::storage::Storage;

/// Resolve a setup session for a non-interactive command
///
/// A `--token` argument is treated as a one-time token and redeemed (the
/// resulting session is stored for later commands). Otherwise the stored
/// session token is used if it is still live.
pub fn resolve_session(
    storage: &Storage,
    session_store: &SessionStore,
    one_time: Option<&str>,
) -> SetupResult<SessionToken> {
    let tokens = TokenService::new(storage);

    if let Some(one_time) = one_time {
        let session = tokens.redeem(one_time)?;
        session_store.store(&session)?;
        return Ok(session);
    }

    if let Some(session) = session_store.load()? {
        if tokens.session_is_valid(&session) {
            return Ok(session);
        }
    }

    Err(SetupError::Token(
        "No setup session. Run `caravel-setup token create` and pass the token via --token".into(),
    ))
}
