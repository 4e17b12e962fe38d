//! Intro page
//!
//! Entry point of the wizard: pick the standard or the extended flow, with a
//! notice (and an admin-claim shortcut) when the server already has users.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::app::App;
use super::super::widgets::{render_feedback, Feedback};
use super::{render_buttons, user};

/// Actions available from the intro page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroAction {
    /// Begin the standard flow
    Standard,
    /// Begin the extended flow (via feature key entry)
    Extended,
    /// Claim an admin account on an already-set-up server
    ClaimAdmin,
}

impl IntroAction {
    fn label(&self) -> &'static str {
        match self {
            IntroAction::Standard => "Begin setup",
            IntroAction::Extended => "Begin setup with a feature key",
            IntroAction::ClaimAdmin => "Make me an admin",
        }
    }
}

/// Intro page state
#[derive(Debug, Clone, Default)]
pub struct IntroState {
    /// Index into the visible action list
    pub cursor: usize,
    pub feedback: Feedback,
}

/// The actions visible given the current server state
fn visible_actions(has_users: bool) -> Vec<IntroAction> {
    let mut actions = vec![IntroAction::Standard, IntroAction::Extended];
    if has_users {
        actions.push(IntroAction::ClaimAdmin);
    }
    actions
}

/// Render the intro page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let snapshot = app.snapshot_or_default();
    let actions = visible_actions(snapshot.has_users);
    let cursor = app.intro.cursor.min(actions.len() - 1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Welcome / notice text
            Constraint::Length(actions.len() as u16 + 1),
            Constraint::Length(1), // Feedback
            Constraint::Min(0),
        ])
        .split(area);

    let mut lines = vec![Line::from(
        "Welcome. This wizard configures logins, outbound e-mail, and the first admin account.",
    )];
    if snapshot.has_users {
        lines.push(Line::from(Span::styled(
            "This server already has user accounts, so initial setup looks complete.",
            Style::default().fg(Color::Yellow),
        )));
    }
    if snapshot.has_admin {
        lines.push(Line::from(Span::styled(
            "An admin account already exists.",
            Style::default().fg(Color::Green),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    for (i, action) in actions.iter().enumerate() {
        let row = Rect {
            y: chunks[1].y + i as u16,
            height: 1,
            ..chunks[1]
        };
        render_buttons(frame, row, &[(action.label(), i == cursor, true)]);
    }

    render_feedback(frame, chunks[2], &mut app.intro.feedback);
}

/// Handle key input for the intro page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let actions = visible_actions(app.snapshot_or_default().has_users);

    match key.code {
        KeyCode::Down | KeyCode::Tab => {
            app.intro.cursor = (app.intro.cursor + 1) % actions.len();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.intro.cursor = app
                .intro
                .cursor
                .checked_sub(1)
                .unwrap_or(actions.len() - 1);
        }
        KeyCode::Enter => {
            let action = actions[app.intro.cursor.min(actions.len() - 1)];
            match action {
                IntroAction::Standard => {
                    app.open_page(super::super::app::Page::Step(
                        crate::wizard::SetupStep::Identity,
                    ));
                }
                IntroAction::Extended => {
                    app.open_page(super::super::app::Page::FeatureKey);
                }
                IntroAction::ClaimAdmin => match user::claim_admin(app, "") {
                    Ok(()) => app.intro.feedback.set_success("You are now an admin."),
                    Err(message) => app.intro.feedback.set_error(message),
                },
            }
        }
        _ => {}
    }
}
