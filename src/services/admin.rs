//! Admin account service
//!
//! Claiming the administrator role during setup. The "current user" of the
//! wizard is the invoking operator; their record is created on first claim.

use crate::audit::{AuditEntry, SetupAction};
use crate::config::SessionToken;
use crate::error::SetupResult;
use crate::models::User;
use crate::storage::Storage;

use super::token::TokenService;

/// Service for admin account management
pub struct AdminService<'a> {
    storage: &'a Storage,
}

impl<'a> AdminService<'a> {
    /// Create a new admin service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Promote the operator's user record to administrator
    ///
    /// Requires a live setup session. A record is created for `login` if
    /// none exists; an existing record keeps its display name unless the
    /// caller supplies a non-empty one.
    pub fn sign_up_as_admin(
        &self,
        token: &SessionToken,
        login: &str,
        display_name: &str,
    ) -> SetupResult<User> {
        TokenService::new(self.storage).verify_session(token)?;

        let mut user = match self.storage.users.get_by_login(login)? {
            Some(existing) => existing,
            None => User::new(login, login),
        };

        if !display_name.trim().is_empty() {
            user.display_name = display_name.trim().to_string();
        }

        user.is_admin = true;
        user.completed_signup = true;

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        self.storage.log_action(&AuditEntry::action(
            SetupAction::AdminClaimed,
            Some(user.id.to_string()),
        ))?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaravelPaths;
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
    fn test_claim_creates_admin() {
        let (storage, session, _temp) = setup_with_session();
        let service = AdminService::new(&storage);

        assert!(!storage.users.any_admin().unwrap());

        let user = service.sign_up_as_admin(&session, "kai", "Kai").unwrap();
        assert!(user.is_admin);
        assert!(user.completed_signup);
        assert!(storage.users.any_admin().unwrap());
    }

    #[test]
    fn test_claim_promotes_existing_user() {
        let (storage, session, _temp) = setup_with_session();

        storage.users.upsert(User::new("kai", "Kai Doe")).unwrap();
        storage.users.save().unwrap();

        let service = AdminService::new(&storage);
        let user = service.sign_up_as_admin(&session, "kai", "").unwrap();

        assert!(user.is_admin);
        // Blank display name keeps the existing one
        assert_eq!(user.display_name, "Kai Doe");
        assert_eq!(storage.users.count().unwrap(), 1);
    }

    #[test]
    fn test_claim_requires_session() {
        let (storage, _session, _temp) = setup_with_session();
        let service = AdminService::new(&storage);

        let bogus = SessionToken::new("bogus");
        assert!(service.sign_up_as_admin(&bogus, "kai", "Kai").is_err());
        assert!(!storage.users.any_admin().unwrap());
    }
}
