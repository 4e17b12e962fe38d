//! Setup token repository for JSON storage
//!
//! Manages the hashed setup token records in tokens.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SetupError;
use crate::models::{SetupToken, TokenId, TokenKind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable token data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TokenData {
    tokens: Vec<SetupToken>,
}

/// Repository for setup token persistence
pub struct TokenRepository {
    path: PathBuf,
    data: RwLock<HashMap<TokenId, SetupToken>>,
}

impl TokenRepository {
    /// Create a new token repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load token records from disk
    pub fn load(&self) -> Result<(), SetupError> {
        let file_data: TokenData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for token in file_data.tokens {
            data.insert(token.id, token);
        }

        Ok(())
    }

    /// Save token records to disk
    pub fn save(&self) -> Result<(), SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut tokens: Vec<_> = data.values().cloned().collect();
        tokens.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &TokenData { tokens })
    }

    /// Insert a token record
    pub fn insert(&self, token: SetupToken) -> Result<(), SetupError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(token.id, token);
        Ok(())
    }

    /// Delete a token record
    pub fn delete(&self, id: TokenId) -> Result<bool, SetupError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Get all unexpired records of a kind
    pub fn get_live(&self, kind: TokenKind) -> Result<Vec<SetupToken>, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .filter(|t| t.kind == kind && !t.is_expired())
            .cloned()
            .collect())
    }

    /// Remove every token record
    pub fn clear(&self) -> Result<usize, SetupError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let removed = data.len();
        data.clear();
        Ok(removed)
    }

    /// Drop expired records from memory
    pub fn prune_expired(&self) -> Result<usize, SetupError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|_, t| !t.is_expired());
        Ok(before - data.len())
    }

    /// Count token records
    pub fn count(&self) -> Result<usize, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
