//! Setup token CLI commands
//!
//! Mints and revokes the one-time tokens that authorize the wizard.

use clap::Subcommand;

use crate::error::SetupResult;
use crate::models::token::ONE_TIME_TOKEN_TTL_MINUTES;
use crate::services::TokenService;
use crate::storage::Storage;

/// Setup token subcommands
#[derive(Subcommand)]
pub enum TokenCommands {
    /// Mint a one-time setup token
    Create,
    /// Revoke every outstanding setup token
    Revoke,
}

/// Handle a token command
pub fn handle_token_command(storage: &Storage, cmd: TokenCommands) -> SetupResult<()> {
    let service = TokenService::new(storage);

    match cmd {
        TokenCommands::Create => {
            let token = service.mint_one_time()?;

            println!("One-time setup token (valid {} minutes):", ONE_TIME_TOKEN_TTL_MINUTES);
            println!();
            println!("  {}", token);
            println!();
            println!("Launch the wizard with it:");
            println!("  caravel-setup wizard --token {}", token);
            println!();
            println!("The token is shown once and stored hashed.");
        }

        TokenCommands::Revoke => {
            let removed = service.revoke_all()?;
            println!("Revoked {} setup token(s).", removed);
        }
    }

    Ok(())
}
