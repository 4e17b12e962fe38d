//! Event handler for the wizard TUI
//!
//! Routes keyboard events to the active page's handler, after the global
//! keys: Ctrl+C always quits, and F1..F6 jump between steps subject to the
//! gating policy.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::wizard::active_steps;

use super::app::{App, Page};
use super::dialogs;
use super::event::Event;
use super::views;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            // One-shot redemption of a token passed on the command line
            app.redeem_pending_token();
            Ok(())
        }
        Event::Mouse(_) | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    app.clear_status();

    // Quit works everywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    // The popup captures input while open
    if app.test_send.is_some() {
        dialogs::test_send::handle_key(app, key);
        return Ok(());
    }

    // Direct jumps between steps, gated on completed prerequisites
    if let (Page::Step(_), KeyCode::F(n)) = (app.page, key.code) {
        let extended = app.extended_mode();
        let steps = active_steps(extended);
        if let Some(target) = (n as usize)
            .checked_sub(1)
            .and_then(|idx| steps.get(idx))
        {
            app.jump_to(*target);
        }
        return Ok(());
    }

    match app.page {
        Page::Step(step) => {
            use crate::wizard::SetupStep;
            match step {
                SetupStep::Intro => views::intro::handle_key(app, key),
                SetupStep::Identity => views::identity::handle_key(app, key),
                SetupStep::Organization => views::organization::handle_key(app, key),
                SetupStep::Email => views::email::handle_key(app, key),
                SetupStep::User => views::user::handle_key(app, key),
                SetupStep::Success => views::success::handle_key(app, key),
            }
        }
        Page::FeatureKey => views::feature_key::handle_key(app, key),
        Page::TokenVerify { .. } | Page::TokenExpired => {
            // Terminal pages: any dismissal key closes the wizard
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.quit();
            }
        }
    }

    Ok(())
}
