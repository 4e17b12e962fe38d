//! Business logic layer
//!
//! One service per concern, each a thin struct over [`Storage`]. Every
//! operation takes the setup session token and verifies it before writing;
//! failures are returned to the calling form, never retried.
//!
//! [`Storage`]: crate::storage::Storage

pub mod admin;
pub mod mail;
pub mod organization;
pub mod settings;
pub mod token;

pub use admin::AdminService;
pub use mail::{MailMessage, MailService, Mailer, SpoolMailer};
pub use organization::OrganizationService;
pub use settings::SettingsService;
pub use token::TokenService;
