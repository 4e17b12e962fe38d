//! Token verification and expiry pages
//!
//! Shown outside the step sequence: while a one-time token is being
//! redeemed (or after it was rejected), and when no valid setup session is
//! held at all.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Render the one-time token verification page
pub fn render_verify(frame: &mut Frame, area: Rect, rejected: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3)])
        .split(area);

    let lines = if rejected {
        vec![
            Line::from(Span::styled(
                "Setup token rejected",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("The token was not recognized or has expired."),
            Line::from("Mint a fresh one on the server with `caravel-setup token create`."),
        ]
    } else {
        vec![Line::from("Checking your setup token...")]
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
}

/// Render the expired-session page
pub fn render_expired(frame: &mut Frame, area: Rect, has_users: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            "No valid setup session",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if has_users {
        lines.push(Line::from(
            "This server is already set up. To revisit the wizard, mint a new token with \
             `caravel-setup token create` and relaunch with `--token`.",
        ));
    } else {
        lines.push(Line::from(
            "Run `caravel-setup token create` on the server, then relaunch the wizard \
             with `--token <token>` to begin setup.",
        ));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
}
