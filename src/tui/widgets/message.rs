//! Inline feedback messages
//!
//! Every form shows the outcome of its last operation in place, next to the
//! controls that triggered it. A message set twice with identical text must
//! still register as a new occurrence, so setting feedback marks it fresh
//! and the first render after each set draws it emphasized.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Severity of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

/// Inline feedback state for one form
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    message: Option<(MessageKind, String)>,
    /// Set on every assignment, cleared by the first render
    fresh: bool,
}

impl Feedback {
    /// Set an error message, flagging it as a new occurrence
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some((MessageKind::Error, message.into()));
        self.fresh = true;
    }

    /// Set a success message, flagging it as a new occurrence
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.message = Some((MessageKind::Success, message.into()));
        self.fresh = true;
    }

    /// Clear any message
    pub fn clear(&mut self) {
        self.message = None;
        self.fresh = false;
    }

    /// The current message, if any
    pub fn message(&self) -> Option<(&MessageKind, &str)> {
        self.message.as_ref().map(|(kind, text)| (kind, text.as_str()))
    }

    /// Whether an error is showing
    pub fn has_error(&self) -> bool {
        matches!(self.message, Some((MessageKind::Error, _)))
    }
}

/// Render a feedback line, consuming the freshness flag
pub fn render_feedback(frame: &mut Frame, area: Rect, feedback: &mut Feedback) {
    let Some((kind, text)) = feedback.message.clone() else {
        return;
    };

    let (prefix, color) = match kind {
        MessageKind::Error => ("Error: ", Color::Red),
        MessageKind::Success => ("", Color::Green),
    };

    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if feedback.fresh {
        // Flash a new occurrence, identical text included
        style = style.add_modifier(Modifier::REVERSED);
        feedback.fresh = false;
    }

    let line = Line::from(vec![Span::styled(format!("{}{}", prefix, text), style)]);
    frame.render_widget(Paragraph::new(line), area);
}
