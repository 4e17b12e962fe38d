//! Session-scoped setup token storage
//!
//! Holds the setup token this machine obtained by redeeming a one-time
//! token. The token lives in a single file under the base directory: written
//! on redemption, read on wizard start, and removed once an admin account
//! has been claimed.

use std::fs;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::paths::CaravelPaths;
use crate::error::{SetupError, SetupResult};

/// A setup token held in memory, wiped on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a plaintext token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the plaintext token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print token material
        write!(f, "SessionToken(..)")
    }
}

/// File-backed store for the session setup token
pub struct SessionStore {
    paths: CaravelPaths,
}

impl SessionStore {
    /// Create a session store over the given paths
    pub fn new(paths: CaravelPaths) -> Self {
        Self { paths }
    }

    /// Load the stored session token, if any
    pub fn load(&self) -> SetupResult<Option<SessionToken>> {
        let path = self.paths.session_token_file();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| SetupError::Io(format!("Failed to read session token: {}", e)))?;

        let token = contents.trim();
        if token.is_empty() {
            return Ok(None);
        }

        Ok(Some(SessionToken::new(token)))
    }

    /// Persist a session token, replacing any previous one
    pub fn store(&self, token: &SessionToken) -> SetupResult<()> {
        self.paths.ensure_directories()?;

        fs::write(self.paths.session_token_file(), token.as_str())
            .map_err(|e| SetupError::Io(format!("Failed to write session token: {}", e)))?;

        Ok(())
    }

    /// Remove the stored session token
    ///
    /// Called once an admin account has been claimed; missing file is fine.
    pub fn clear(&self) -> SetupResult<()> {
        let path = self.paths.session_token_file();
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| SetupError::Io(format!("Failed to remove session token: {}", e)))?;
        }
        Ok(())
    }
}
