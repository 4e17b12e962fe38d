//! Outbound mail service
//!
//! Persisting the SMTP configuration and pushing a test message through a
//! not-yet-persisted one. Actual delivery is someone else's job: the
//! [`Mailer`] seam hands messages off, and the default implementation drops
//! them into the host's spool directory for the mail daemon.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{AuditEntry, SetupAction};
use crate::config::SessionToken;
use crate::error::{SetupError, SetupResult};
use crate::models::SmtpConfig;
use crate::storage::{write_json_atomic, Storage};

use super::token::TokenService;

/// A message handed to the mailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery seam; implementations own the wire
pub trait Mailer {
    /// Hand a message off for delivery through the given configuration
    fn deliver(&self, config: &SmtpConfig, message: &MailMessage) -> SetupResult<()>;
}

/// Spool entry written for the host's mail daemon
#[derive(Debug, Serialize, Deserialize)]
struct SpoolEntry {
    queued_at: DateTime<Utc>,
    hostname: String,
    port: u16,
    /// Credential user only; the password never touches the spool
    auth_user: String,
    return_address: String,
    message: MailMessage,
}

/// Mailer that queues messages into the outbox directory
pub struct SpoolMailer {
    outbox_dir: PathBuf,
}

impl SpoolMailer {
    /// Create a spool mailer writing into the given directory
    pub fn new(outbox_dir: PathBuf) -> Self {
        Self { outbox_dir }
    }
}

impl Mailer for SpoolMailer {
    fn deliver(&self, config: &SmtpConfig, message: &MailMessage) -> SetupResult<()> {
        let entry = SpoolEntry {
            queued_at: Utc::now(),
            hostname: config.hostname.clone(),
            port: config.port,
            auth_user: config.auth.user.clone(),
            return_address: config.return_address.clone(),
            message: message.clone(),
        };

        let path = self
            .outbox_dir
            .join(format!("{}.json", Uuid::new_v4().simple()));
        write_json_atomic(path, &entry)
            .map_err(|e| SetupError::Mail(format!("Failed to queue message: {}", e)))
    }
}

/// Service for outbound mail configuration
pub struct MailService<'a> {
    storage: &'a Storage,
    mailer: &'a dyn Mailer,
}

impl<'a> MailService<'a> {
    /// Create a new mail service over the given delivery seam
    pub fn new(storage: &'a Storage, mailer: &'a dyn Mailer) -> Self {
        Self { storage, mailer }
    }

    /// Persist the outbound mail configuration
    ///
    /// While passwordless e-mail login is enabled the server cannot run
    /// without working mail, so hostname, port, and return address must all
    /// be populated. Otherwise the form is saved as entered.
    pub fn set_smtp_config(&self, token: &SessionToken, config: SmtpConfig) -> SetupResult<()> {
        TokenService::new(self.storage).verify_session(token)?;

        let email_login = self.storage.config.get()?.providers.email_token;
        if email_login && !config.is_fully_populated() {
            return Err(SetupError::Validation(
                "Hostname, port, and return address are required while e-mail login is enabled"
                    .into(),
            ));
        }

        if !config.return_address.trim().is_empty() && !config.return_address.contains('@') {
            return Err(SetupError::Validation(
                "Return address must be an e-mail address".into(),
            ));
        }

        self.storage.config.update(|server| {
            server.smtp = Some(config.clone());
        })?;
        self.storage.config.save()?;

        self.storage.log_action(&AuditEntry::with_payload(
            SetupAction::SmtpSaved,
            Some(format!("{}:{}", config.hostname, config.port)),
            // Redact credentials from the audit trail
            &serde_json::json!({
                "hostname": config.hostname,
                "port": config.port,
                "return_address": config.return_address,
            }),
        ))?;

        Ok(())
    }

    /// Send a test message through a not-yet-persisted configuration
    pub fn test_send(
        &self,
        token: &SessionToken,
        config: &SmtpConfig,
        test_address: &str,
    ) -> SetupResult<()> {
        TokenService::new(self.storage).verify_session(token)?;

        if !config.is_fully_populated() {
            return Err(SetupError::Mail(
                "Hostname, port, and return address are needed before sending".into(),
            ));
        }

        let test_address = test_address.trim();
        if test_address.is_empty() || !test_address.contains('@') {
            return Err(SetupError::Validation(
                "Enter the e-mail address to send the test to".into(),
            ));
        }

        let message = MailMessage {
            to: test_address.to_string(),
            subject: "Caravel outbound mail test".into(),
            body: "Your Caravel server can send mail. Nothing else to do here.".into(),
        };

        self.mailer.deliver(config, &message)?;

        self.storage.log_action(&AuditEntry::action(
            SetupAction::TestMailSent,
            Some(test_address.to_string()),
        ))?;

        Ok(())
    }
}
