//! Read-only configuration snapshot
//!
//! Gating decisions are made against an explicitly passed snapshot of the
//! live configuration rather than ambient global state. Callers take a fresh
//! snapshot per decision; nothing here is cached.

use crate::models::{ProviderFlags, SmtpConfig};

/// The slice of server state the wizard consults
#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    /// Identity provider on/off switches
    pub providers: ProviderFlags,
    /// The persisted outbound mail configuration, if any
    pub smtp: Option<SmtpConfig>,
    /// Whether a valid feature key is on record (selects the extended flow)
    pub feature_key_valid: bool,
    /// Whether any user record exists
    pub has_users: bool,
    /// Whether an admin account exists
    pub has_admin: bool,
}

impl ConfigSnapshot {
    /// Whether the persisted mail configuration is fully populated
    pub fn smtp_fully_populated(&self) -> bool {
        self.smtp.as_ref().is_some_and(|c| c.is_fully_populated())
    }
}
