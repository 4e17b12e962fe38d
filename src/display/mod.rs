//! Terminal output formatting for the CLI commands

pub mod status;

pub use status::{format_recent_activity, format_status, StatusCounts};
