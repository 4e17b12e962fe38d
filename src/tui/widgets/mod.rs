//! Reusable widgets for the wizard TUI

pub mod input;
pub mod message;

pub use input::TextInput;
pub use message::{render_feedback, Feedback, MessageKind};
