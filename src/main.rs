use anyhow::Result;
use clap::{Parser, Subcommand};

use caravel_setup::cli::{
    handle_smtp_command, handle_status_command, handle_token_command, SmtpArgs, TokenCommands,
};
use caravel_setup::config::{CaravelPaths, SessionStore};
use caravel_setup::storage::Storage;
use caravel_setup::tui::run_wizard;

#[derive(Parser)]
#[command(
    name = "caravel-setup",
    version,
    about = "Terminal-based setup wizard for bootstrapping a Caravel server",
    long_about = "caravel-setup walks you through first-run configuration of a Caravel \
                  server: identity providers, organization policy, outbound e-mail, \
                  and the first administrator account. Access is authorized by \
                  one-time setup tokens minted with 'caravel-setup token create'."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive setup wizard
    #[command(alias = "ui")]
    Wizard {
        /// One-time setup token to redeem on startup
        #[arg(long)]
        token: Option<String>,
    },

    /// Setup token management
    #[command(subcommand)]
    Token(TokenCommands),

    /// Configure outbound mail without the wizard
    Smtp(SmtpArgs),

    /// Show current configuration and recent setup activity
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and storage
    let paths = CaravelPaths::new()?;
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let session_store = SessionStore::new(paths);

    match cli.command {
        Some(Commands::Wizard { token }) => {
            run_wizard(&storage, session_store, token)?;
        }
        Some(Commands::Token(cmd)) => {
            handle_token_command(&storage, cmd)?;
        }
        Some(Commands::Smtp(args)) => {
            handle_smtp_command(&storage, &session_store, args)?;
        }
        Some(Commands::Status) => {
            handle_status_command(&storage)?;
        }
        None => {
            println!("caravel-setup - Setup wizard for a Caravel server");
            println!();
            println!("Run 'caravel-setup token create' on the server to mint a setup token.");
            println!("Run 'caravel-setup wizard --token <token>' to begin setup.");
            println!("Run 'caravel-setup --help' for all commands.");
        }
    }

    Ok(())
}
