//! Identity provider flags
//!
//! The server supports five login providers. The identity step of the wizard
//! is considered complete once at least one of them is enabled.

use serde::{Deserialize, Serialize};

/// The closed set of identity providers the server knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// Passwordless login via emailed token
    EmailToken,
    Google,
    Github,
    Ldap,
    Saml,
}

impl Provider {
    /// All providers, in the order the identity step lists them
    pub const ALL: [Provider; 5] = [
        Provider::EmailToken,
        Provider::Google,
        Provider::Github,
        Provider::Ldap,
        Provider::Saml,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Provider::EmailToken => "E-mail (passwordless)",
            Provider::Google => "Google",
            Provider::Github => "GitHub",
            Provider::Ldap => "LDAP",
            Provider::Saml => "SAML",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Enabled/disabled state for every provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderFlags {
    #[serde(default)]
    pub email_token: bool,
    #[serde(default)]
    pub google: bool,
    #[serde(default)]
    pub github: bool,
    #[serde(default)]
    pub ldap: bool,
    #[serde(default)]
    pub saml: bool,
}

impl ProviderFlags {
    /// Whether the given provider is enabled
    pub fn enabled(&self, provider: Provider) -> bool {
        match provider {
            Provider::EmailToken => self.email_token,
            Provider::Google => self.google,
            Provider::Github => self.github,
            Provider::Ldap => self.ldap,
            Provider::Saml => self.saml,
        }
    }

    /// Enable or disable the given provider
    pub fn set_enabled(&mut self, provider: Provider, enabled: bool) {
        match provider {
            Provider::EmailToken => self.email_token = enabled,
            Provider::Google => self.google = enabled,
            Provider::Github => self.github = enabled,
            Provider::Ldap => self.ldap = enabled,
            Provider::Saml => self.saml = enabled,
        }
    }

    /// Toggle the given provider
    pub fn toggle(&mut self, provider: Provider) {
        let current = self.enabled(provider);
        self.set_enabled(provider, !current);
    }

    /// Whether any provider is enabled
    pub fn any_enabled(&self) -> bool {
        Provider::ALL.iter().any(|p| self.enabled(*p))
    }
}
