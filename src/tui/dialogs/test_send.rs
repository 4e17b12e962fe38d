//! Test-send popup
//!
//! Modal dialog for pushing a test message through the SMTP configuration as
//! currently entered on the e-mail page, before anything is persisted.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::services::{MailService, Mailer};

use super::super::app::App;
use super::super::layout::centered_rect;
use super::super::views::render_text_field;
use super::super::widgets::{render_feedback, Feedback, TextInput};

/// State for the test-send popup
#[derive(Debug, Clone)]
pub struct TestSendState {
    /// Address to send the test message to
    pub address: TextInput,
    pub feedback: Feedback,
}

impl Default for TestSendState {
    fn default() -> Self {
        Self {
            address: TextInput::new().placeholder("you@example.com"),
            feedback: Feedback::default(),
        }
    }
}

/// Render the test-send popup over the e-mail page
pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(state) = app.test_send.as_mut() else {
        return;
    };

    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Send a test e-mail ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Address
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Feedback
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    render_text_field(frame, chunks[0], "Send test to", &state.address, true);

    render_feedback(frame, chunks[2], &mut state.feedback);

    let send_enabled = !state.address.is_blank();
    let hints = Line::from(vec![
        Span::styled(
            "[Enter]",
            if send_enabled {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
        Span::raw(" Send  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Close"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[3]);
}

/// Handle key input while the popup is open
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.test_send = None;
        }
        KeyCode::Enter => send_test(app),
        KeyCode::Backspace => {
            if let Some(state) = app.test_send.as_mut() {
                state.address.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(state) = app.test_send.as_mut() {
                state.address.delete();
            }
        }
        KeyCode::Left => {
            if let Some(state) = app.test_send.as_mut() {
                state.address.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(state) = app.test_send.as_mut() {
                state.address.move_right();
            }
        }
        KeyCode::Char(c) => {
            if let Some(state) = app.test_send.as_mut() {
                state.address.insert(c);
            }
        }
        _ => {}
    }
}

/// Push a test message through the entered configuration
fn send_test(app: &mut App) {
    let Some(mut state) = app.test_send.take() else {
        return;
    };

    if state.address.is_blank() {
        app.test_send = Some(state);
        return;
    }

    let Some(session) = app.session_token() else {
        state.feedback.set_error("No setup session token is held");
        app.test_send = Some(state);
        return;
    };

    let config = app.email_form.build_config();
    let address = state.address.value().trim().to_string();

    let mailer: &dyn Mailer = &app.mailer;
    let result = MailService::new(app.storage, mailer).test_send(&session, &config, &address);

    match result {
        Ok(()) => state.feedback.set_success(format!(
            "Sent a test email to {}. It should arrive shortly.",
            address
        )),
        Err(e) => state.feedback.set_error(e.to_string()),
    }

    app.test_send = Some(state);
}
