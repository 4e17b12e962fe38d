//! Organization membership policy
//!
//! Decides which logins are automatically treated as organization members.
//! Each rule rides on one of the identity providers and is only meaningful
//! while that provider is enabled.

use serde::{Deserialize, Serialize};

use super::provider::{Provider, ProviderFlags};

/// A membership rule scoped to an e-mail domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DomainRule {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub domain: String,
}

/// A membership rule without domain scoping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MembershipToggle {
    #[serde(default)]
    pub enabled: bool,
}

/// Organization membership settings, one rule per supporting provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrganizationSettings {
    /// Members are addresses under this domain logging in by e-mail token
    #[serde(default)]
    pub email_token: DomainRule,
    /// Members are Google accounts under this hosted domain
    #[serde(default)]
    pub google: DomainRule,
    /// Every LDAP login is a member
    #[serde(default)]
    pub ldap: MembershipToggle,
    /// Every SAML login is a member
    #[serde(default)]
    pub saml: MembershipToggle,
}

impl OrganizationSettings {
    /// The providers whose rules are enabled but whose login provider is off
    ///
    /// A rule like this can never match anyone; the save path rejects it.
    pub fn orphaned_rules(&self, providers: &ProviderFlags) -> Vec<Provider> {
        let mut orphaned = Vec::new();
        if self.email_token.enabled && !providers.email_token {
            orphaned.push(Provider::EmailToken);
        }
        if self.google.enabled && !providers.google {
            orphaned.push(Provider::Google);
        }
        if self.ldap.enabled && !providers.ldap {
            orphaned.push(Provider::Ldap);
        }
        if self.saml.enabled && !providers.saml {
            orphaned.push(Provider::Saml);
        }
        orphaned
    }
}
