//! Success page
//!
//! The closing page of the wizard.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::wizard::SetupStep;

use super::super::app::App;
use super::render_buttons;

/// Focus positions on the success page
const BACK: usize = 0;
const FINISH: usize = 1;

/// Render the success page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let snapshot = app.snapshot_or_default();
    let cursor = app.success_cursor.min(FINISH);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "Setup is complete.",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))];
    if snapshot.has_admin {
        lines.push(Line::from(
            "Sign in with your admin account to invite users and fine-tune the server.",
        ));
    } else {
        lines.push(Line::from(Span::styled(
            "No admin account exists yet; go back one step to claim one.",
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    render_buttons(
        frame,
        chunks[1],
        &[
            ("Back", cursor == BACK, true),
            ("Close wizard", cursor == FINISH, true),
        ],
    );
}

/// Handle key input for the success page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
            // Two controls; any movement key flips between them
            app.success_cursor = if app.success_cursor == BACK { FINISH } else { BACK };
        }
        KeyCode::Esc => app.go_back(SetupStep::Success),
        KeyCode::Enter => {
            if app.success_cursor.min(FINISH) == BACK {
                app.go_back(SetupStep::Success);
            } else {
                app.quit();
            }
        }
        _ => {}
    }
}
