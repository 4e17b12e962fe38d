//! Terminal User Interface module
//!
//! The full-screen setup wizard, built with ratatui. One view per wizard
//! page, a shared progress header, and modal dialogs for popups.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_wizard;
