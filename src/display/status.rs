//! Status display formatting
//!
//! Formats the current server configuration for terminal output.

use chrono::Local;

use crate::audit::AuditEntry;
use crate::models::Provider;
use crate::storage::ServerConfig;

/// Summary counts shown alongside the configuration
pub struct StatusCounts {
    pub users: usize,
    pub has_admin: bool,
    pub outstanding_tokens: usize,
}

/// Format the server configuration overview
pub fn format_status(config: &ServerConfig, counts: &StatusCounts) -> String {
    let mut output = String::new();

    output.push_str("Identity providers\n");
    output.push_str("------------------\n");
    for provider in Provider::ALL {
        let state = if config.providers.enabled(provider) {
            "enabled"
        } else {
            "disabled"
        };
        output.push_str(&format!("  {:<22}  {}\n", provider.label(), state));
    }
    output.push('\n');

    output.push_str("Outbound mail\n");
    output.push_str("-------------\n");
    match &config.smtp {
        Some(smtp) if smtp.is_fully_populated() => {
            output.push_str(&format!("  Relay:          {}:{}\n", smtp.hostname, smtp.port));
            output.push_str(&format!("  Return address: {}\n", smtp.return_address));
            if !smtp.auth.user.is_empty() {
                output.push_str(&format!("  Username:       {}\n", smtp.auth.user));
            }
        }
        Some(_) => output.push_str("  Partially configured\n"),
        None => output.push_str("  Not configured\n"),
    }
    output.push('\n');

    output.push_str("Organization\n");
    output.push_str("------------\n");
    match &config.feature_key {
        Some(key) if key.is_valid() => {
            output.push_str(&format!(
                "  Feature key: {} (valid until {})\n",
                key.payload.organization,
                key.payload.expires.format("%Y-%m-%d")
            ));

            let org = &config.organization;
            let mut rules = Vec::new();
            if org.email_token.enabled {
                rules.push(format!("e-mail domain {}", org.email_token.domain));
            }
            if org.google.enabled {
                rules.push(format!("Google domain {}", org.google.domain));
            }
            if org.ldap.enabled {
                rules.push("all LDAP logins".to_string());
            }
            if org.saml.enabled {
                rules.push("all SAML logins".to_string());
            }

            if rules.is_empty() {
                output.push_str("  Membership:  no rules\n");
            } else {
                output.push_str(&format!("  Membership:  {}\n", rules.join(", ")));
            }
        }
        Some(_) => output.push_str("  Feature key expired\n"),
        None => output.push_str("  No feature key (standard flow)\n"),
    }
    output.push('\n');

    output.push_str("Accounts\n");
    output.push_str("--------\n");
    output.push_str(&format!(
        "  Users: {}  (admin: {})\n",
        counts.users,
        if counts.has_admin { "yes" } else { "no" }
    ));
    output.push_str(&format!(
        "  Outstanding setup tokens: {}\n",
        counts.outstanding_tokens
    ));

    output
}

/// Format the most recent setup actions
pub fn format_recent_activity(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    output.push_str("Recent setup activity\n");
    output.push_str("---------------------\n");
    for entry in entries {
        let when = entry.timestamp.with_timezone(&Local);
        let detail = entry
            .detail
            .as_deref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {}  {}{}\n",
            when.format("%Y-%m-%d %H:%M"),
            entry.action,
            detail
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::SetupAction;
    use crate::models::SmtpConfig;

    #[test]
    fn test_status_unconfigured() {
        let config = ServerConfig::default();
        let counts = StatusCounts {
            users: 0,
            has_admin: false,
            outstanding_tokens: 0,
        };

        let out = format_status(&config, &counts);
        assert!(out.contains("Not configured"));
        assert!(out.contains("No feature key"));
        assert!(out.contains("admin: no"));
    }

    #[test]
    fn test_status_with_smtp() {
        let config = ServerConfig {
            smtp: Some(SmtpConfig {
                hostname: "mail.example.com".into(),
                port: 587,
                auth: Default::default(),
                return_address: "caravel@example.com".into(),
            }),
            ..Default::default()
        };
        let counts = StatusCounts {
            users: 2,
            has_admin: true,
            outstanding_tokens: 1,
        };

        let out = format_status(&config, &counts);
        assert!(out.contains("mail.example.com:587"));
        assert!(out.contains("admin: yes"));
    }

    #[test]
    fn test_recent_activity() {
        let entries = vec![AuditEntry::action(
            SetupAction::TokenCreated,
            Some("tok-12345678".into()),
        )];

        let out = format_recent_activity(&entries);
        assert!(out.contains("token created"));
        assert!(out.contains("tok-12345678"));

        assert!(format_recent_activity(&[]).is_empty());
    }
}
