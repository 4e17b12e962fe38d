//! E-mail page
//!
//! The SMTP form. Next persists the configuration and advances only on
//! success; Skip moves on without saving but is held back while passwordless
//! e-mail login depends on a working (persisted) configuration; Test opens
//! the test-send popup for the configuration as currently entered.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::models::{parse_port, SmtpAuth, SmtpConfig};
use crate::services::{MailService, Mailer};
use crate::storage::ServerConfig;
use crate::wizard::{ConfigSnapshot, SetupStep};

use super::super::app::App;
use super::super::dialogs::test_send::TestSendState;
use super::super::widgets::{render_feedback, Feedback, TextInput};
use super::{render_buttons, render_text_field};

/// Which field is currently focused in the SMTP form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailField {
    #[default]
    Hostname,
    Port,
    Username,
    Password,
    ReturnAddress,
    Test,
    Skip,
    Back,
    Next,
}

impl EmailField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Hostname => Self::Port,
            Self::Port => Self::Username,
            Self::Username => Self::Password,
            Self::Password => Self::ReturnAddress,
            Self::ReturnAddress => Self::Test,
            Self::Test => Self::Skip,
            Self::Skip => Self::Back,
            Self::Back => Self::Next,
            Self::Next => Self::Hostname,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Hostname => Self::Next,
            Self::Port => Self::Hostname,
            Self::Username => Self::Port,
            Self::Password => Self::Username,
            Self::ReturnAddress => Self::Password,
            Self::Test => Self::ReturnAddress,
            Self::Skip => Self::Test,
            Self::Back => Self::Skip,
            Self::Next => Self::Back,
        }
    }
}

/// State for the SMTP form
#[derive(Debug, Clone, Default)]
pub struct EmailFormState {
    /// Currently focused field
    pub focused: EmailField,

    pub hostname: TextInput,
    pub port: TextInput,
    pub username: TextInput,
    pub password: TextInput,
    pub return_address: TextInput,

    pub feedback: Feedback,
}

impl EmailFormState {
    /// Create form state pre-populated from the stored configuration
    ///
    /// With nothing persisted yet the fields start empty; the port only
    /// falls back to 25 at submit time.
    pub fn from_config(config: &ServerConfig) -> Self {
        let smtp = config.smtp.as_ref();
        Self {
            focused: EmailField::Hostname,
            hostname: TextInput::new()
                .placeholder("mail.example.com")
                .content(smtp.map(|c| c.hostname.clone()).unwrap_or_default()),
            port: TextInput::new()
                .placeholder("25")
                .content(smtp.map(|c| c.port.to_string()).unwrap_or_default()),
            username: TextInput::new()
                .content(smtp.map(|c| c.auth.user.clone()).unwrap_or_default()),
            password: TextInput::new()
                .content(smtp.map(|c| c.auth.pass.clone()).unwrap_or_default())
                .masked(),
            return_address: TextInput::new()
                .placeholder("caravel@example.com")
                .content(smtp.map(|c| c.return_address.clone()).unwrap_or_default()),
            feedback: Feedback::default(),
        }
    }

    /// Build the configuration this form would submit
    ///
    /// A port that doesn't parse falls back to 25.
    pub fn build_config(&self) -> SmtpConfig {
        SmtpConfig {
            hostname: self.hostname.value().trim().to_string(),
            port: parse_port(self.port.value()),
            auth: SmtpAuth {
                user: self.username.value().to_string(),
                pass: self.password.value().to_string(),
            },
            return_address: self.return_address.value().trim().to_string(),
        }
    }

    /// Whether the required fields are populated as currently entered
    fn required_fields_entered(&self) -> bool {
        !self.hostname.is_blank() && !self.port.is_blank() && !self.return_address.is_blank()
    }

    /// Next submits the entered form, so it gates on the live fields
    pub fn next_allowed(&self, snapshot: &ConfigSnapshot) -> bool {
        !snapshot.providers.email_token || self.required_fields_entered()
    }

    /// Skip bypasses the form, so it gates on the *persisted* configuration
    pub fn skip_allowed(snapshot: &ConfigSnapshot) -> bool {
        !snapshot.providers.email_token || snapshot.smtp_fully_populated()
    }

    /// Test sends through the entered form
    pub fn test_allowed(&self) -> bool {
        self.required_fields_entered()
    }

    /// Get the currently focused text input (if applicable)
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            EmailField::Hostname => Some(&mut self.hostname),
            EmailField::Port => Some(&mut self.port),
            EmailField::Username => Some(&mut self.username),
            EmailField::Password => Some(&mut self.password),
            EmailField::ReturnAddress => Some(&mut self.return_address),
            _ => None,
        }
    }
}

/// Render the e-mail page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let snapshot = app.snapshot_or_default();
    let focused = app.email_form.focused;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Length(1), // Hostname
            Constraint::Length(1), // Port
            Constraint::Length(1), // Username
            Constraint::Length(1), // Password
            Constraint::Length(1), // Return address
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    let mut heading = vec![Line::from(
        "Point the server at an SMTP relay for invitations and notifications.",
    )];
    if snapshot.providers.email_token {
        heading.push(Line::from(
            "Passwordless e-mail login is enabled, so outbound mail is required.",
        ));
    }
    frame.render_widget(
        Paragraph::new(heading).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let form = &app.email_form;
    render_text_field(
        frame,
        chunks[1],
        "Hostname      ",
        &form.hostname,
        focused == EmailField::Hostname,
    );
    render_text_field(
        frame,
        chunks[2],
        "Port          ",
        &form.port,
        focused == EmailField::Port,
    );
    render_text_field(
        frame,
        chunks[3],
        "Username      ",
        &form.username,
        focused == EmailField::Username,
    );
    render_text_field(
        frame,
        chunks[4],
        "Password      ",
        &form.password,
        focused == EmailField::Password,
    );
    render_text_field(
        frame,
        chunks[5],
        "Return address",
        &form.return_address,
        focused == EmailField::ReturnAddress,
    );

    render_feedback(frame, chunks[7], &mut app.email_form.feedback);

    let form = &app.email_form;
    render_buttons(
        frame,
        chunks[8],
        &[
            ("Send test e-mail", focused == EmailField::Test, form.test_allowed()),
            (
                "Skip",
                focused == EmailField::Skip,
                EmailFormState::skip_allowed(&snapshot),
            ),
            ("Back", focused == EmailField::Back, true),
            ("Next", focused == EmailField::Next, form.next_allowed(&snapshot)),
        ],
    );
}

/// Handle key input for the e-mail page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.email_form.focused = app.email_form.focused.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.email_form.focused = app.email_form.focused.prev();
        }
        KeyCode::Esc => app.go_back(SetupStep::Email),
        KeyCode::Enter => {
            let snapshot = app.snapshot_or_default();
            match app.email_form.focused {
                EmailField::Back => app.go_back(SetupStep::Email),
                EmailField::Skip => {
                    if EmailFormState::skip_allowed(&snapshot) {
                        app.go_next(SetupStep::Email);
                    }
                }
                EmailField::Test => {
                    if app.email_form.test_allowed() {
                        app.test_send = Some(TestSendState::default());
                    }
                }
                _ => {
                    if app.email_form.next_allowed(&snapshot) {
                        submit(app);
                    }
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.email_form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = app.email_form.focused_input() {
                input.delete();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.email_form.focused_input() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.email_form.focused_input() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = app.email_form.focused_input() {
                input.move_start();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.email_form.focused_input() {
                input.move_end();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.email_form.focused_input() {
                input.insert(c);
            }
        }
        _ => {}
    }
}

/// Persist the entered configuration; advance only on success
fn submit(app: &mut App) {
    let Some(session) = app.session_token() else {
        app.email_form
            .feedback
            .set_error("No setup session token is held");
        return;
    };

    let config = app.email_form.build_config();
    let mailer: &dyn Mailer = &app.mailer;
    match MailService::new(app.storage, mailer).set_smtp_config(&session, config) {
        Ok(()) => app.go_next(SetupStep::Email),
        Err(e) => app.email_form.feedback.set_error(e.to_string()),
    }
}
