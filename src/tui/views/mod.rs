//! Page rendering for the wizard TUI
//!
//! One module per page, each owning its form state, its render function, and
//! its key handler, plus the shared field/button helpers they draw with.

pub mod email;
pub mod feature_key;
pub mod identity;
pub mod intro;
pub mod organization;
pub mod progress;
pub mod success;
pub mod token;
pub mod user;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::wizard::SetupStep;

use super::app::{App, Page};
use super::layout::WizardLayout;
use super::widgets::TextInput;

/// Render the whole frame: title, progress, active page, hints
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = WizardLayout::new(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        " Caravel server setup",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, layout.title);

    match app.page {
        Page::Step(step) => {
            progress::render(frame, layout.progress, app, step);
            match step {
                SetupStep::Intro => intro::render(frame, layout.body, app),
                SetupStep::Identity => identity::render(frame, layout.body, app),
                SetupStep::Organization => organization::render(frame, layout.body, app),
                SetupStep::Email => email::render(frame, layout.body, app),
                SetupStep::User => user::render(frame, layout.body, app),
                SetupStep::Success => success::render(frame, layout.body, app),
            }
        }
        Page::FeatureKey => feature_key::render(frame, layout.body, app),
        Page::TokenVerify { rejected } => token::render_verify(frame, layout.body, rejected),
        Page::TokenExpired => {
            let has_users = app.snapshot_or_default().has_users;
            token::render_expired(frame, layout.body, has_users);
        }
    }

    render_hints(frame, layout.hints, app);

    // The test-send popup draws over everything else
    if app.test_send.is_some() {
        super::dialogs::test_send::render(frame, app);
    }
}

/// Render the bottom line: a transient status message, or the key hints
fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(ref status) = app.status_message {
        let line = Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Green),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints = match app.page {
        Page::Step(_) => " Tab move · Space toggle · Enter activate · F1-F6 jump · Ctrl+C quit",
        Page::FeatureKey => " Tab move · Enter activate · Ctrl+C quit",
        Page::TokenVerify { .. } | Page::TokenExpired => " Esc or Ctrl+C quit",
    };

    let line = Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render a labeled text field with cursor
pub(crate) fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &TextInput,
    focused: bool,
) {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let value_style = Style::default().fg(Color::White);

    let display_value = if input.masked {
        "*".repeat(input.content.chars().count())
    } else {
        input.content.clone()
    };

    let display_value = if display_value.is_empty() && !focused {
        input.placeholder.clone()
    } else {
        display_value
    };

    let mut spans = vec![Span::styled(format!("{}: ", label), label_style)];

    if focused {
        let cursor_pos = input.cursor.min(display_value.len());
        let (before, after) = display_value.split_at(cursor_pos);

        spans.push(Span::styled(before.to_string(), value_style));

        let cursor_char = after.chars().next().unwrap_or(' ');
        spans.push(Span::styled(
            cursor_char.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));

        let rest = after.chars().skip(1).collect::<String>();
        if !rest.is_empty() {
            spans.push(Span::styled(rest, value_style));
        }
    } else {
        spans.push(Span::styled(display_value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a checkbox row
pub(crate) fn render_toggle(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    focused: bool,
    enabled: bool,
) {
    let box_str = if checked { "[x] " } else { "[ ] " };

    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![Span::styled(format!("{}{}", box_str, label), style)];
    if focused && enabled {
        spans.push(Span::styled(
            "  (Space to toggle)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Build a span for one button in a button row
pub(crate) fn button_span(label: &str, focused: bool, enabled: bool) -> Span<'static> {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Span::styled(format!("[ {} ]", label), style)
}

/// Render a row of buttons separated by spaces
pub(crate) fn render_buttons(frame: &mut Frame, area: Rect, buttons: &[(&str, bool, bool)]) {
    let mut spans = Vec::new();
    for (i, (label, focused, enabled)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(button_span(label, *focused, *enabled));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
