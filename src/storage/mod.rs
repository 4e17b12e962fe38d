//! Storage layer for caravel-setup
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation for the documents the wizard reads and writes.

pub mod file_io;
pub mod server_config;
pub mod tokens;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use server_config::{ServerConfig, ServerConfigRepository};
pub use tokens::TokenRepository;
pub use users::UserRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::CaravelPaths;
use crate::error::SetupError;
use crate::wizard::ConfigSnapshot;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CaravelPaths,
    audit: AuditLogger,
    pub config: ServerConfigRepository,
    pub users: UserRepository,
    pub tokens: TokenRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: CaravelPaths) -> Result<Self, SetupError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            config: ServerConfigRepository::new(paths.server_config_file()),
            users: UserRepository::new(paths.users_file()),
            tokens: TokenRepository::new(paths.tokens_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CaravelPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), SetupError> {
        self.config.load()?;
        self.users.load()?;
        self.tokens.load()?;
        Ok(())
    }

    /// Append an entry to the setup audit log
    pub fn log_action(&self, entry: &AuditEntry) -> Result<(), SetupError> {
        self.audit.log(entry)
    }

    /// Access the setup audit log
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Take a read-only snapshot of the configuration the wizard gates on
    ///
    /// Snapshots are cheap and taken per gating decision, never cached.
    pub fn snapshot(&self) -> Result<ConfigSnapshot, SetupError> {
        let config = self.config.get()?;

        Ok(ConfigSnapshot {
            providers: config.providers,
            smtp: config.smtp,
            feature_key_valid: config.feature_key.as_ref().is_some_and(|k| k.is_valid()),
            has_users: self.users.any_users()?,
            has_admin: self.users.any_admin()?,
        })
    }
}
