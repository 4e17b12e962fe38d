//! Server configuration repository
//!
//! A single JSON document holding everything the wizard configures short of
//! user records: provider flags, outbound mail, organization policy, and the
//! feature key.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::models::{FeatureKey, OrganizationSettings, ProviderFlags, SmtpConfig};

use super::file_io::{read_json, write_json_atomic};

/// The persisted server configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// Identity provider on/off switches
    #[serde(default)]
    pub providers: ProviderFlags,

    /// Outbound mail configuration, absent until the email step saves one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp: Option<SmtpConfig>,

    /// Organization membership policy
    #[serde(default)]
    pub organization: OrganizationSettings,

    /// Feature key unlocking the extended setup flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_key: Option<FeatureKey>,
}

/// Repository for the server configuration document
pub struct ServerConfigRepository {
    path: PathBuf,
    data: RwLock<ServerConfig>,
}

impl ServerConfigRepository {
    /// Create a new repository over the given document path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(ServerConfig::default()),
        }
    }

    /// Load the document from disk (missing file loads as defaults)
    pub fn load(&self) -> Result<(), SetupError> {
        let file_data: ServerConfig = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = file_data;
        Ok(())
    }

    /// Save the document to disk
    pub fn save(&self) -> Result<(), SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Get a copy of the current configuration
    pub fn get(&self) -> Result<ServerConfig, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Apply a mutation to the in-memory configuration
    ///
    /// Callers follow with `save()` to persist, mirroring the upsert/save
    /// split of the other repositories.
    pub fn update<F>(&self, mutate: F) -> Result<(), SetupError>
    where
        F: FnOnce(&mut ServerConfig),
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        mutate(&mut data);
        Ok(())
    }

    /// Whether a valid feature key is on record
    pub fn is_feature_key_valid(&self) -> Result<bool, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.feature_key.as_ref().is_some_and(|k| k.is_valid()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_repo() -> (ServerConfigRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ServerConfigRepository::new(temp_dir.path().join("server-config.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let (repo, _temp) = test_repo();
        repo.load().unwrap();

        let config = repo.get().unwrap();
        assert!(!config.providers.any_enabled());
        assert!(config.smtp.is_none());
        assert!(config.feature_key.is_none());
    }

    #[test]
    fn test_update_and_save_round_trip() {
        let (repo, temp) = test_repo();
        repo.load().unwrap();

        repo.update(|config| {
            config.providers.google = true;
            config.smtp = Some(SmtpConfig {
                hostname: "mail.example.com".into(),
                port: 587,
                auth: Default::default(),
                return_address: "caravel@example.com".into(),
            });
        })
        .unwrap();
        repo.save().unwrap();

        let reloaded = ServerConfigRepository::new(temp.path().join("server-config.json"));
        reloaded.load().unwrap();

        let config = reloaded.get().unwrap();
        assert!(config.providers.google);
        assert_eq!(config.smtp.unwrap().port, 587);
    }

    #[test]
    fn test_no_feature_key_is_invalid() {
        let (repo, _temp) = test_repo();
        repo.load().unwrap();
        assert!(!repo.is_feature_key_valid().unwrap());
    }
}
