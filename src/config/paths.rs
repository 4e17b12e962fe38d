//! Path management for caravel-setup
//!
//! Provides XDG-compliant path resolution for the server configuration
//! documents the wizard reads and writes.
//!
//! ## Path Resolution Order
//!
//! 1. `CARAVEL_SETUP_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/caravel` or `~/.config/caravel`
//! 3. Windows: `%APPDATA%\caravel`

use std::path::PathBuf;

use crate::error::SetupError;

/// Manages all paths used by caravel-setup
#[derive(Debug, Clone)]
pub struct CaravelPaths {
    /// Base directory for all Caravel configuration data
    base_dir: PathBuf,
}

impl CaravelPaths {
    /// Create a new CaravelPaths instance
    ///
    /// Path resolution:
    /// 1. `CARAVEL_SETUP_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/caravel` or `~/.config/caravel`
    /// 3. Windows: `%APPDATA%\caravel`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SetupError> {
        let base_dir = if let Ok(custom) = std::env::var("CARAVEL_SETUP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CaravelPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/caravel/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/caravel/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the mail spool directory (~/.config/caravel/outbox/)
    pub fn outbox_dir(&self) -> PathBuf {
        self.base_dir.join("outbox")
    }

    /// Get the path to the server configuration document
    pub fn server_config_file(&self) -> PathBuf {
        self.data_dir().join("server-config.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to tokens.json (hashed setup tokens)
    pub fn tokens_file(&self) -> PathBuf {
        self.data_dir().join("tokens.json")
    }

    /// Get the path to the session token file (this machine's redeemed token)
    pub fn session_token_file(&self) -> PathBuf {
        self.base_dir.join("session-token")
    }

    /// Get the path to the setup audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("setup-audit.log")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/caravel/)
    /// - Data directory (~/.config/caravel/data/)
    /// - Outbox directory (~/.config/caravel/outbox/)
    pub fn ensure_directories(&self) -> Result<(), SetupError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SetupError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SetupError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.outbox_dir())
            .map_err(|e| SetupError::Io(format!("Failed to create outbox directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SetupError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("caravel"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SetupError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SetupError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("caravel"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaravelPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.outbox_dir(), temp_dir.path().join("outbox"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaravelPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.outbox_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaravelPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.server_config_file(),
            temp_dir.path().join("data").join("server-config.json")
        );
        assert_eq!(
            paths.session_token_file(),
            temp_dir.path().join("session-token")
        );
    }
}
