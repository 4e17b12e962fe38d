//! Core data models for caravel-setup

pub mod feature_key;
pub mod ids;
pub mod organization;
pub mod provider;
pub mod smtp;
pub mod token;
pub mod user;

pub use feature_key::{FeatureKey, FeatureKeyPayload};
pub use ids::{TokenId, UserId};
pub use organization::{DomainRule, MembershipToggle, OrganizationSettings};
pub use provider::{Provider, ProviderFlags};
pub use smtp::{parse_port, SmtpAuth, SmtpConfig, DEFAULT_SMTP_PORT};
pub use token::{SetupToken, TokenKind};
pub use user::User;
