//! Outbound mail configuration
//!
//! Mirrors the shape the server persists: hostname, port, optional
//! credentials, and the return address stamped on outgoing mail.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Port used when the form's port field doesn't parse
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// SMTP credentials
///
/// The password is wiped from memory when the struct is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, Zeroize)]
pub struct SmtpAuth {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub pass: String,
}

impl Drop for SmtpAuth {
    fn drop(&mut self) {
        self.pass.zeroize();
    }
}

/// Outbound mail configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub hostname: String,
    pub port: u16,
    #[serde(default)]
    pub auth: SmtpAuth,
    pub return_address: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: DEFAULT_SMTP_PORT,
            auth: SmtpAuth::default(),
            return_address: String::new(),
        }
    }
}

impl SmtpConfig {
    /// Whether hostname, port, and return address are all populated
    ///
    /// This is the bar the email step's completion predicate and its Skip
    /// control measure against; credentials stay optional.
    pub fn is_fully_populated(&self) -> bool {
        !self.hostname.trim().is_empty() && self.port != 0 && !self.return_address.trim().is_empty()
    }
}

/// Parse a port field, falling back to the default SMTP port
///
/// Matches the server's historic behavior: anything that doesn't parse as a
/// port number becomes 25 rather than an error.
pub fn parse_port(input: &str) -> u16 {
    input.trim().parse().unwrap_or(DEFAULT_SMTP_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_not_populated() {
        assert!(!SmtpConfig::default().is_fully_populated());
    }

    #[test]
    fn test_fully_populated() {
        let config = SmtpConfig {
            hostname: "mail.example.com".into(),
            port: 587,
            auth: SmtpAuth::default(),
            return_address: "caravel@example.com".into(),
        };
        assert!(config.is_fully_populated());
    }

    #[test]
    fn test_blank_hostname_not_populated() {
        let config = SmtpConfig {
            hostname: "   ".into(),
            port: 587,
            auth: SmtpAuth::default(),
            return_address: "caravel@example.com".into(),
        };
        assert!(!config.is_fully_populated());
    }

    #[test]
    fn test_port_zero_not_populated() {
        let config = SmtpConfig {
            hostname: "mail.example.com".into(),
            port: 0,
            auth: SmtpAuth::default(),
            return_address: "caravel@example.com".into(),
        };
        assert!(!config.is_fully_populated());
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("587"), 587);
        assert_eq!(parse_port(" 25 "), 25);
        assert_eq!(parse_port(""), DEFAULT_SMTP_PORT);
        assert_eq!(parse_port("not-a-port"), DEFAULT_SMTP_PORT);
        assert_eq!(parse_port("99999"), DEFAULT_SMTP_PORT);
    }
}
