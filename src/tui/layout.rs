//! Layout definitions for the wizard TUI
//!
//! Every page shares the same frame: a header with the title and progress
//! bar, the page body, and a one-line key hint bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions shared by all wizard pages
pub struct WizardLayout {
    /// Title line
    pub title: Rect,
    /// Step progress bar
    pub progress: Rect,
    /// Page content
    pub body: Rect,
    /// Key hints at the bottom
    pub hints: Rect,
}

impl WizardLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(2), // Progress bar + separator
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Hints
            ])
            .split(area);

        Self {
            title: chunks[0],
            progress: chunks[1],
            body: chunks[2],
            hints: chunks[3],
        }
    }
}

/// Create a centered rect for dialogs
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
