//! Status CLI command
//!
//! Prints the current server configuration, account counts, and the most
//! recent setup activity.

use crate::display::{format_recent_activity, format_status, StatusCounts};
use crate::error::SetupResult;
use crate::models::TokenKind;
use crate::storage::Storage;

/// Handle the status command
pub fn handle_status_command(storage: &Storage) -> SetupResult<()> {
    let config = storage.config.get()?;

    let outstanding = storage.tokens.get_live(TokenKind::OneTime)?.len()
        + storage.tokens.get_live(TokenKind::Session)?.len();

    let counts = StatusCounts {
        users: storage.users.count()?,
        has_admin: storage.users.any_admin()?,
        outstanding_tokens: outstanding,
    };

    println!("Caravel Server Configuration");
    println!("============================");
    println!("Config directory: {}", storage.paths().base_dir().display());
    println!();
    print!("{}", format_status(&config, &counts));

    let recent = storage.audit().read_recent(5)?;
    if !recent.is_empty() {
        println!();
        print!("{}", format_recent_activity(&recent));
    }

    Ok(())
}
