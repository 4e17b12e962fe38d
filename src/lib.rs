//! caravel-setup - Terminal-based setup wizard for a Caravel server
//!
//! This library implements the first-run setup flow for a Caravel server:
//! a multi-step wizard that configures identity providers, organization
//! policy, and outbound mail, and bootstraps the first administrator
//! account. Access is authorized by one-time setup tokens minted on the
//! server and exchanged for session-scoped tokens.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and the session token file
//! - `error`: Custom error types
//! - `models`: Core data models (providers, SMTP, organization, tokens, users)
//! - `storage`: JSON file storage layer
//! - `wizard`: Step sequencing and gating logic
//! - `services`: Business logic layer (the setup operations)
//! - `audit`: Setup audit logging
//! - `display`: Terminal output formatting
//! - `cli`: Non-interactive commands
//! - `tui`: The interactive wizard itself

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;
pub mod wizard;

pub use error::{SetupError, SetupResult};
