//! Modal dialogs for the wizard TUI

pub mod test_send;
