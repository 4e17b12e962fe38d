//! Feature key page
//!
//! Entry point of the extended flow: paste a feature key, verify it, and
//! move on to the identity step. Next stays disabled until a valid key is on
//! record.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::services::SettingsService;
use crate::storage::ServerConfig;
use crate::wizard::SetupStep;

use super::super::app::{App, Page};
use super::super::widgets::{render_feedback, Feedback, TextInput};
use super::{render_buttons, render_text_field};

/// Which field is currently focused on the feature key page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureKeyField {
    #[default]
    Key,
    Verify,
    Back,
    Next,
}

impl FeatureKeyField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Key => Self::Verify,
            Self::Verify => Self::Back,
            Self::Back => Self::Next,
            Self::Next => Self::Key,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Key => Self::Next,
            Self::Verify => Self::Key,
            Self::Back => Self::Verify,
            Self::Next => Self::Back,
        }
    }
}

/// State for the feature key page
#[derive(Debug, Clone, Default)]
pub struct FeatureKeyFormState {
    /// Currently focused field
    pub focused: FeatureKeyField,

    pub key_input: TextInput,

    pub feedback: Feedback,
}

impl FeatureKeyFormState {
    /// Create form state pre-populated with the stored key text
    pub fn from_config(config: &ServerConfig) -> Self {
        let raw = config
            .feature_key
            .as_ref()
            .map(|k| k.raw.clone())
            .unwrap_or_default();

        Self {
            focused: FeatureKeyField::Key,
            key_input: TextInput::new()
                .placeholder("Paste your feature key")
                .content(raw),
            feedback: Feedback::default(),
        }
    }
}

/// Render the feature key page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let config = app.storage.config.get().unwrap_or_default();
    let focused = app.feature_key_form.focused;
    let key_valid = config.feature_key.as_ref().is_some_and(|k| k.is_valid());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(1), // Key input
            Constraint::Length(2), // Key status
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(
        "A feature key unlocks organization management for this server.",
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(heading, chunks[0]);

    render_text_field(
        frame,
        chunks[1],
        "Feature key",
        &app.feature_key_form.key_input,
        focused == FeatureKeyField::Key,
    );

    let status = match config.feature_key.as_ref() {
        Some(key) if key.is_valid() => Line::from(Span::styled(
            format!(
                "Key for {} is valid until {}.",
                key.payload.organization,
                key.payload.expires.format("%Y-%m-%d")
            ),
            Style::default().fg(Color::Green),
        )),
        Some(_) => Line::from(Span::styled(
            "The stored feature key has expired.",
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "No feature key on record yet.",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), chunks[2]);

    render_feedback(frame, chunks[3], &mut app.feature_key_form.feedback);

    render_buttons(
        frame,
        chunks[4],
        &[
            ("Verify key", focused == FeatureKeyField::Verify, true),
            ("Back", focused == FeatureKeyField::Back, true),
            ("Next", focused == FeatureKeyField::Next, key_valid),
        ],
    );
}

/// Handle key input for the feature key page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.feature_key_form.focused = app.feature_key_form.focused.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.feature_key_form.focused = app.feature_key_form.focused.prev();
        }
        KeyCode::Esc => app.open_page(Page::Step(SetupStep::Intro)),
        KeyCode::Enter => match app.feature_key_form.focused {
            FeatureKeyField::Back => app.open_page(Page::Step(SetupStep::Intro)),
            FeatureKeyField::Next => {
                // Once the key is valid the extended sequence is in effect,
                // so the step after the intro is identity.
                if app.extended_mode() {
                    app.open_page(Page::Step(SetupStep::Identity));
                }
            }
            _ => verify_key(app),
        },
        KeyCode::Backspace => {
            if app.feature_key_form.focused == FeatureKeyField::Key {
                app.feature_key_form.key_input.backspace();
            }
        }
        KeyCode::Left => {
            if app.feature_key_form.focused == FeatureKeyField::Key {
                app.feature_key_form.key_input.move_left();
            }
        }
        KeyCode::Right => {
            if app.feature_key_form.focused == FeatureKeyField::Key {
                app.feature_key_form.key_input.move_right();
            }
        }
        KeyCode::Char(c) => {
            if app.feature_key_form.focused == FeatureKeyField::Key {
                app.feature_key_form.key_input.insert(c);
            }
        }
        _ => {}
    }
}

/// Parse and store the entered key
fn verify_key(app: &mut App) {
    let Some(session) = app.session_token() else {
        app.feature_key_form
            .feedback
            .set_error("No setup session token is held");
        return;
    };

    let raw = app.feature_key_form.key_input.value().to_string();
    match SettingsService::new(app.storage).save_feature_key(&session, &raw) {
        Ok(saved) => app.feature_key_form.feedback.set_success(format!(
            "Feature key for {} accepted.",
            saved.payload.organization
        )),
        Err(e) => app.feature_key_form.feedback.set_error(e.to_string()),
    }
}
