//! User records
//!
//! The wizard only cares about two questions answered by this collection:
//! does any user exist (setup looks complete), and does an admin exist (the
//! user step may advance).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// A server user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Login name, unique per server
    pub login: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Whether this user holds the admin role
    pub is_admin: bool,
    /// Whether first-login signup has been finished
    pub completed_signup: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record
    pub fn new(login: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            login: login.into(),
            display_name: display_name.into(),
            is_admin: false,
            completed_signup: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_not_admin() {
        let user = User::new("kai", "Kai");
        assert!(!user.is_admin);
        assert!(!user.completed_signup);
        assert_eq!(user.login, "kai");
    }
}
