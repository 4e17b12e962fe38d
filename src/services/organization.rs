//! Organization policy service
//!
//! Persists the organization step's membership rules.

use crate::audit::{AuditEntry, SetupAction};
use crate::config::SessionToken;
use crate::error::{SetupError, SetupResult};
use crate::models::OrganizationSettings;
use crate::storage::Storage;

use super::token::TokenService;

/// Service for organization membership policy
pub struct OrganizationService<'a> {
    storage: &'a Storage,
}

impl<'a> OrganizationService<'a> {
    /// Create a new organization service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Persist organization membership settings
    ///
    /// A rule riding on a disabled identity provider can never match anyone
    /// and is rejected rather than silently saved.
    pub fn save_organization_settings(
        &self,
        token: &SessionToken,
        settings: OrganizationSettings,
    ) -> SetupResult<()> {
        TokenService::new(self.storage).verify_session(token)?;

        let providers = self.storage.config.get()?.providers;
        let orphaned = settings.orphaned_rules(&providers);
        if let Some(provider) = orphaned.first() {
            return Err(SetupError::Validation(format!(
                "The {} membership rule requires the {} login provider to be enabled",
                provider, provider
            )));
        }

        for rule in [&settings.email_token, &settings.google] {
            if rule.enabled && rule.domain.trim().is_empty() {
                return Err(SetupError::Validation(
                    "Domain-based membership rules need a domain".into(),
                ));
            }
        }

        self.storage
            .config
            .update(|config| config.organization = settings.clone())?;
        self.storage.config.save()?;

        self.storage.log_action(&AuditEntry::with_payload(
            SetupAction::OrganizationSaved,
            None,
            &settings,
        ))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaravelPaths;
    use crate::models::{DomainRule, MembershipToggle};
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
    fn test_save_with_matching_provider() {
        let (storage, session, _temp) = setup_with_session();
        storage
            .config
            .update(|config| config.providers.email_token = true)
            .unwrap();

        let service = OrganizationService::new(&storage);
        let settings = OrganizationSettings {
            email_token: DomainRule {
                enabled: true,
                domain: "example.com".into(),
            },
            ..Default::default()
        };

        service
            .save_organization_settings(&session, settings)
            .unwrap();

        let saved = storage.config.get().unwrap().organization;
        assert_eq!(saved.email_token.domain, "example.com");
    }

    #[test]
    fn test_orphaned_rule_rejected() {
        let (storage, session, _temp) = setup_with_session();
        let service = OrganizationService::new(&storage);

        let settings = OrganizationSettings {
            saml: MembershipToggle { enabled: true },
            ..Default::default()
        };

        let err = service
            .save_organization_settings(&session, settings)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_domain_rule_needs_domain() {
        let (storage, session, _temp) = setup_with_session();
        storage
            .config
            .update(|config| config.providers.google = true)
            .unwrap();

        let service = OrganizationService::new(&storage);
        let settings = OrganizationSettings {
            google: DomainRule {
                enabled: true,
                domain: "  ".into(),
            },
            ..Default::default()
        };

        assert!(service
            .save_organization_settings(&session, settings)
            .is_err());
    }
}
