//! Identity providers page
//!
//! Toggles for the five login providers. Each toggle is persisted as it is
//! flipped; Next stays disabled until at least one provider is enabled.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::models::Provider;
use crate::services::SettingsService;
use crate::wizard::{SetupStep, StepGate};

use super::super::app::App;
use super::super::widgets::{render_feedback, Feedback};
use super::{render_buttons, render_toggle};

/// Focus positions: one per provider, then Back and Next
const PROVIDER_ROWS: usize = Provider::ALL.len();
const BACK_ROW: usize = PROVIDER_ROWS;
const NEXT_ROW: usize = PROVIDER_ROWS + 1;
const ROW_COUNT: usize = PROVIDER_ROWS + 2;

/// Identity page state
#[derive(Debug, Clone, Default)]
pub struct IdentityFormState {
    /// Focused row index
    pub cursor: usize,
    pub feedback: Feedback,
}

/// Render the identity page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let snapshot = app.snapshot_or_default();
    let next_enabled = StepGate::new(&snapshot).is_complete(SetupStep::Identity);
    let cursor = app.identity_form.cursor;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(PROVIDER_ROWS as u16),
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(
        "Choose how users will log in. Enable at least one provider to continue.",
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(heading, chunks[0]);

    for (i, provider) in Provider::ALL.iter().enumerate() {
        let row = Rect {
            y: chunks[1].y + i as u16,
            height: 1,
            ..chunks[1]
        };
        render_toggle(
            frame,
            row,
            provider.label(),
            snapshot.providers.enabled(*provider),
            cursor == i,
            true,
        );
    }

    render_feedback(frame, chunks[3], &mut app.identity_form.feedback);

    render_buttons(
        frame,
        chunks[4],
        &[
            ("Back", cursor == BACK_ROW, true),
            ("Next", cursor == NEXT_ROW, next_enabled),
        ],
    );
}

/// Handle key input for the identity page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Tab => {
            app.identity_form.cursor = (app.identity_form.cursor + 1) % ROW_COUNT;
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.identity_form.cursor = app
                .identity_form
                .cursor
                .checked_sub(1)
                .unwrap_or(ROW_COUNT - 1);
        }
        KeyCode::Char(' ') => {
            let cursor = app.identity_form.cursor;
            if cursor < PROVIDER_ROWS {
                toggle_provider(app, Provider::ALL[cursor]);
            }
        }
        KeyCode::Enter => {
            let cursor = app.identity_form.cursor;
            if cursor < PROVIDER_ROWS {
                toggle_provider(app, Provider::ALL[cursor]);
            } else if cursor == BACK_ROW {
                app.go_back(SetupStep::Identity);
            } else {
                let snapshot = app.snapshot_or_default();
                if StepGate::new(&snapshot).is_complete(SetupStep::Identity) {
                    app.go_next(SetupStep::Identity);
                }
            }
        }
        KeyCode::Esc => app.go_back(SetupStep::Identity),
        _ => {}
    }
}

/// Flip one provider, persisting immediately
fn toggle_provider(app: &mut App, provider: Provider) {
    let Some(session) = app.session_token() else {
        app.identity_form
            .feedback
            .set_error("No setup session token is held");
        return;
    };

    let enabled = app.snapshot_or_default().providers.enabled(provider);
    let result =
        SettingsService::new(app.storage).set_provider_enabled(&session, provider, !enabled);

    match result {
        Ok(()) => app.identity_form.feedback.clear(),
        Err(e) => app.identity_form.feedback.set_error(e.to_string()),
    }
}
