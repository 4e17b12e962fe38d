//! Audit entry data structures
//!
//! Defines the structure of setup audit log entries: which action ran, when,
//! and an optional detail payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Setup actions worth a durable trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupAction {
    /// A one-time setup token was minted
    TokenCreated,
    /// A one-time token was exchanged for a session token
    TokenRedeemed,
    /// All outstanding tokens were revoked
    TokensRevoked,
    /// Identity provider flags changed
    ProvidersUpdated,
    /// A feature key was saved
    FeatureKeySaved,
    /// Organization membership policy was saved
    OrganizationSaved,
    /// Outbound mail configuration was saved
    SmtpSaved,
    /// A test message was handed to the mailer
    TestMailSent,
    /// A user was promoted to administrator
    AdminClaimed,
}

impl std::fmt::Display for SetupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SetupAction::TokenCreated => "token created",
            SetupAction::TokenRedeemed => "token redeemed",
            SetupAction::TokensRevoked => "tokens revoked",
            SetupAction::ProvidersUpdated => "providers updated",
            SetupAction::FeatureKeySaved => "feature key saved",
            SetupAction::OrganizationSaved => "organization saved",
            SetupAction::SmtpSaved => "SMTP config saved",
            SetupAction::TestMailSent => "test mail sent",
            SetupAction::AdminClaimed => "admin claimed",
        };
        f.write_str(label)
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the action occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// The action performed
    pub action: SetupAction,

    /// Short human-readable detail (e.g. the token's record id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// JSON view of the state written by the action, secrets excluded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create an entry for an action with no payload
    pub fn action(action: SetupAction, detail: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            detail,
            payload: None,
        }
    }

    /// Create an entry carrying the state the action wrote
    pub fn with_payload<T: Serialize>(
        action: SetupAction,
        detail: Option<String>,
        payload: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            detail,
            payload: serde_json::to_value(payload).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_entry() {
        let entry = AuditEntry::action(SetupAction::AdminClaimed, Some("usr-12345678".into()));
        assert_eq!(entry.action, SetupAction::AdminClaimed);
        assert!(entry.payload.is_none());
    }

    #[test]
    fn test_payload_entry() {
        let entry = AuditEntry::with_payload(
            SetupAction::SmtpSaved,
            None,
            &json!({"hostname": "mail.example.com"}),
        );
        assert!(entry.payload.is_some());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&SetupAction::TokenRedeemed).unwrap();
        assert_eq!(json, "\"token_redeemed\"");
    }
}
