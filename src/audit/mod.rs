//! Setup audit logging
//!
//! Append-only record of the actions the wizard and CLI perform, so an
//! operator can reconstruct how the server ended up configured.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, SetupAction};
pub use logger::AuditLogger;
