//! Admin account page
//!
//! The operator claims the administrator role here. Next stays disabled
//! until the server has an admin; claiming also removes this machine's
//! session token file, since the token has served its purpose.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::services::AdminService;
use crate::wizard::SetupStep;

use super::super::app::{operator_login, App};
use super::super::widgets::{render_feedback, Feedback, TextInput};
use super::{render_buttons, render_text_field};

/// Which field is currently focused on the user page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserField {
    #[default]
    DisplayName,
    Claim,
    Back,
    Next,
}

impl UserField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::DisplayName => Self::Claim,
            Self::Claim => Self::Back,
            Self::Back => Self::Next,
            Self::Next => Self::DisplayName,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::DisplayName => Self::Next,
            Self::Claim => Self::DisplayName,
            Self::Back => Self::Claim,
            Self::Next => Self::Back,
        }
    }
}

/// State for the user page
#[derive(Debug, Clone, Default)]
pub struct UserFormState {
    /// Currently focused field
    pub focused: UserField,

    /// Operator login the admin record is keyed on
    pub login: String,

    pub display_name: TextInput,

    pub feedback: Feedback,
}

impl UserFormState {
    /// Create form state for the invoking operator
    pub fn for_operator(login: &str) -> Self {
        Self {
            focused: UserField::DisplayName,
            login: login.to_string(),
            display_name: TextInput::new().placeholder("Display name").content(login),
            feedback: Feedback::default(),
        }
    }
}

/// Render the user page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let snapshot = app.snapshot_or_default();
    let focused = app.user_form.focused;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Heading + status
            Constraint::Length(1), // Login
            Constraint::Length(1), // Display name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    let mut heading = vec![Line::from(
        "Create the first administrator account for this server.",
    )];
    if snapshot.has_admin {
        heading.push(Line::from(Span::styled(
            "The server has an admin account.",
            Style::default().fg(Color::Green),
        )));
    }
    frame.render_widget(
        Paragraph::new(heading).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let login_line = Line::from(vec![
        Span::styled("Login         : ", Style::default().fg(Color::Yellow)),
        Span::styled(
            app.user_form.login.clone(),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(login_line), chunks[1]);

    render_text_field(
        frame,
        chunks[2],
        "Display name  ",
        &app.user_form.display_name,
        focused == UserField::DisplayName,
    );

    render_feedback(frame, chunks[4], &mut app.user_form.feedback);

    render_buttons(
        frame,
        chunks[5],
        &[
            ("Claim admin account", focused == UserField::Claim, true),
            ("Back", focused == UserField::Back, true),
            ("Next", focused == UserField::Next, snapshot.has_admin),
        ],
    );
}

/// Handle key input for the user page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.user_form.focused = app.user_form.focused.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.user_form.focused = app.user_form.focused.prev();
        }
        KeyCode::Esc => app.go_back(SetupStep::User),
        KeyCode::Enter => match app.user_form.focused {
            UserField::Back => app.go_back(SetupStep::User),
            UserField::Next => {
                if app.snapshot_or_default().has_admin {
                    app.go_next(SetupStep::User);
                }
            }
            _ => {
                let display_name = app.user_form.display_name.value().trim().to_string();
                match claim_admin(app, &display_name) {
                    Ok(()) => app.user_form.feedback.set_success("You are now an admin."),
                    Err(message) => app.user_form.feedback.set_error(message),
                }
            }
        },
        KeyCode::Backspace => {
            if app.user_form.focused == UserField::DisplayName {
                app.user_form.display_name.backspace();
            }
        }
        KeyCode::Delete => {
            if app.user_form.focused == UserField::DisplayName {
                app.user_form.display_name.delete();
            }
        }
        KeyCode::Left => {
            if app.user_form.focused == UserField::DisplayName {
                app.user_form.display_name.move_left();
            }
        }
        KeyCode::Right => {
            if app.user_form.focused == UserField::DisplayName {
                app.user_form.display_name.move_right();
            }
        }
        KeyCode::Char(c) => {
            if app.user_form.focused == UserField::DisplayName {
                app.user_form.display_name.insert(c);
            }
        }
        _ => {}
    }
}

/// Promote the operator to admin and forget this machine's session token
///
/// Shared with the intro page's claim shortcut. The token records on the
/// server stay live, so the remaining wizard pages keep working.
pub(crate) fn claim_admin(app: &mut App, display_name: &str) -> Result<(), String> {
    let Some(session) = app.session_token() else {
        return Err("No setup session token is held".to_string());
    };

    let login = operator_login();
    AdminService::new(app.storage)
        .sign_up_as_admin(&session, &login, display_name)
        .map_err(|e| e.to_string())?;

    if let Err(e) = app.session_store.clear() {
        app.set_status(format!("Warning: could not remove session token: {}", e));
    }

    Ok(())
}
