//! User repository for JSON storage
//!
//! Manages loading and saving user records to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SetupError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), SetupError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by login name
    pub fn get_by_login(&self, login: &str) -> Result<Option<User>, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().find(|u| u.login == login).cloned())
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), SetupError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(user.id, user);
        Ok(())
    }

    /// Whether any user exists
    ///
    /// The wizard uses this as the heuristic for "initial setup complete",
    /// since creating the admin user is the final step.
    pub fn any_users(&self) -> Result<bool, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(!data.is_empty())
    }

    /// Whether any admin exists
    pub fn any_admin(&self) -> Result<bool, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().any(|u| u.is_admin))
    }

    /// Count users
    pub fn count(&self) -> Result<usize, SetupError> {
        let data = self
            .data
            .read()
            .map_err(|e| SetupError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_repo() -> (UserRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        (repo, temp_dir)
    }

    #[test]
    fn test_empty_repo() {
        let (repo, _temp) = test_repo();
        repo.load().unwrap();

        assert!(!repo.any_users().unwrap());
        assert!(!repo.any_admin().unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_lookup() {
        let (repo, _temp) = test_repo();
        repo.load().unwrap();

        let mut user = User::new("kai", "Kai");
        user.is_admin = true;
        repo.upsert(user).unwrap();

        assert!(repo.any_users().unwrap());
        assert!(repo.any_admin().unwrap());

        let found = repo.get_by_login("kai").unwrap().unwrap();
        assert_eq!(found.display_name, "Kai");
    }

    #[test]
    fn test_save_and_reload() {
        let (repo, temp) = test_repo();
        repo.load().unwrap();

        repo.upsert(User::new("kai", "Kai")).unwrap();
        repo.save().unwrap();

        let repo2 = UserRepository::new(temp.path().join("users.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
        assert!(!repo2.any_admin().unwrap());
    }
}
