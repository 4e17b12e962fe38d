//! Step progress header
//!
//! Renders the active sequence with the current step highlighted. Steps the
//! gating policy admits are shown as jump targets with their F-key; blocked
//! steps are dimmed.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::wizard::{active_steps, SetupStep, StepGate};

use super::super::app::App;

/// Render the progress bar for the given current step
pub fn render(frame: &mut Frame, area: Rect, app: &App, current: SetupStep) {
    let snapshot = app.snapshot_or_default();
    let extended = snapshot.feature_key_valid;
    let gate = StepGate::new(&snapshot);
    let steps = active_steps(extended);

    let current_idx = steps.iter().position(|s| *s == current);

    let mut spans = vec![Span::raw(" ")];
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        }

        let at_or_before = current_idx.map(|c| i <= c).unwrap_or(false);
        let style = if Some(i) == current_idx {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if at_or_before {
            Style::default().fg(Color::Green)
        } else if gate.may_jump_to(*step, extended) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(format!("F{} {}", i + 1, step.title()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
