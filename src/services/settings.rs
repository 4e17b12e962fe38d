//! Identity provider and feature key service
//!
//! The identity step's provider toggles and the feature key entry page both
//! land here: small writes to the server configuration document.

use crate::audit::{AuditEntry, SetupAction};
use crate::config::SessionToken;
use crate::error::SetupResult;
use crate::models::{FeatureKey, Provider};
use crate::storage::Storage;

use super::token::TokenService;

/// Service for provider flags and the feature key
pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    /// Create a new settings service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Enable or disable an identity provider
    pub fn set_provider_enabled(
        &self,
        token: &SessionToken,
        provider: Provider,
        enabled: bool,
    ) -> SetupResult<()> {
        TokenService::new(self.storage).verify_session(token)?;

        self.storage
            .config
            .update(|config| config.providers.set_enabled(provider, enabled))?;
        self.storage.config.save()?;

        let providers = self.storage.config.get()?.providers;
        self.storage.log_action(&AuditEntry::with_payload(
            SetupAction::ProvidersUpdated,
            Some(format!("{}: {}", provider, enabled)),
            &providers,
        ))?;

        Ok(())
    }

    /// Parse and store a feature key
    ///
    /// The key text is validated before anything is written; a malformed or
    /// expired key leaves the stored key untouched.
    pub fn save_feature_key(&self, token: &SessionToken, raw: &str) -> SetupResult<FeatureKey> {
        TokenService::new(self.storage).verify_session(token)?;

        let key = FeatureKey::parse(raw)?;
        if !key.is_valid() {
            return Err(crate::error::SetupError::FeatureKey(
                "Feature key has expired".into(),
            ));
        }

        self.storage
            .config
            .update(|config| config.feature_key = Some(key.clone()))?;
        self.storage.config.save()?;

        self.storage.log_action(&AuditEntry::action(
            SetupAction::FeatureKeySaved,
            Some(key.payload.organization.clone()),
        ))?;

        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaravelPaths;
    use crate::models::FeatureKeyPayload;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn setup_with_session() -> (Storage, SessionToken, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaravelPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let tokens = TokenService::new(&storage);
        let one_time = tokens.mint_one_time().unwrap();
        let session = tokens.redeem(&one_time).unwrap();

        (storage, session, temp_dir)
    }

    #[test]
    fn test_toggle_provider() {
        let (storage, session, _temp) = setup_with_session();
        let service = SettingsService::new(&storage);

        service
            .set_provider_enabled(&session, Provider::Ldap, true)
            .unwrap();
        assert!(storage.snapshot().unwrap().providers.ldap);

        service
            .set_provider_enabled(&session, Provider::Ldap, false)
            .unwrap();
        assert!(!storage.snapshot().unwrap().providers.ldap);
    }

    #[test]
    fn test_save_feature_key() {
        let (storage, session, _temp) = setup_with_session();
        let service = SettingsService::new(&storage);

        let raw = FeatureKey::encode(&FeatureKeyPayload {
            organization: "Example Corp".into(),
            expires: Utc::now() + Duration::days(30),
        })
        .unwrap();

        service.save_feature_key(&session, &raw).unwrap();
        assert!(storage.snapshot().unwrap().feature_key_valid);
    }

    #[test]
    fn test_expired_key_rejected() {
        let (storage, session, _temp) = setup_with_session();
        let service = SettingsService::new(&storage);

        let raw = FeatureKey::encode(&FeatureKeyPayload {
            organization: "Example Corp".into(),
            expires: Utc::now() - Duration::days(1),
        })
        .unwrap();

        assert!(service.save_feature_key(&session, &raw).is_err());
        assert!(!storage.snapshot().unwrap().feature_key_valid);
    }

    #[test]
    fn test_requires_session() {
        let (storage, _session, _temp) = setup_with_session();
        let service = SettingsService::new(&storage);

        let bogus = SessionToken::new("bogus");
        assert!(service
            .set_provider_enabled(&bogus, Provider::Google, true)
            .is_err());
    }
}
