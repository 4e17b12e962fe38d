//! Organization page
//!
//! Membership rules deciding which logins automatically join the
//! organization. Each rule rides on an identity provider and stays inert
//! (and un-toggleable) while that provider is disabled. Saving goes through
//! the organization service; the page only advances on success.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::models::{DomainRule, MembershipToggle, OrganizationSettings};
use crate::services::OrganizationService;
use crate::storage::ServerConfig;
use crate::wizard::SetupStep;

use super::super::app::App;
use super::super::widgets::{render_feedback, Feedback, TextInput};
use super::{render_buttons, render_text_field, render_toggle};

/// Which field is currently focused in the organization form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrgField {
    #[default]
    EmailToggle,
    EmailDomain,
    GoogleToggle,
    GoogleDomain,
    LdapToggle,
    SamlToggle,
    Back,
    Save,
}

impl OrgField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::EmailToggle => Self::EmailDomain,
            Self::EmailDomain => Self::GoogleToggle,
            Self::GoogleToggle => Self::GoogleDomain,
            Self::GoogleDomain => Self::LdapToggle,
            Self::LdapToggle => Self::SamlToggle,
            Self::SamlToggle => Self::Back,
            Self::Back => Self::Save,
            Self::Save => Self::EmailToggle,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::EmailToggle => Self::Save,
            Self::EmailDomain => Self::EmailToggle,
            Self::GoogleToggle => Self::EmailDomain,
            Self::GoogleDomain => Self::GoogleToggle,
            Self::LdapToggle => Self::GoogleDomain,
            Self::SamlToggle => Self::LdapToggle,
            Self::Back => Self::SamlToggle,
            Self::Save => Self::Back,
        }
    }
}

/// State for the organization form
#[derive(Debug, Clone, Default)]
pub struct OrganizationFormState {
    /// Currently focused field
    pub focused: OrgField,

    pub email_enabled: bool,
    pub email_domain: TextInput,

    pub google_enabled: bool,
    pub google_domain: TextInput,

    pub ldap_enabled: bool,
    pub saml_enabled: bool,

    pub feedback: Feedback,
}

impl OrganizationFormState {
    /// Create form state pre-populated from the stored settings
    pub fn from_config(config: &ServerConfig) -> Self {
        let org = &config.organization;
        Self {
            focused: OrgField::EmailToggle,
            email_enabled: org.email_token.enabled,
            email_domain: TextInput::new()
                .placeholder("example.com")
                .content(&org.email_token.domain),
            google_enabled: org.google.enabled,
            google_domain: TextInput::new()
                .placeholder("example.com")
                .content(&org.google.domain),
            ldap_enabled: org.ldap.enabled,
            saml_enabled: org.saml.enabled,
            feedback: Feedback::default(),
        }
    }

    /// Get the currently focused text input (if applicable)
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            OrgField::EmailDomain => Some(&mut self.email_domain),
            OrgField::GoogleDomain => Some(&mut self.google_domain),
            _ => None,
        }
    }

    /// Build the settings this form would submit
    pub fn build_settings(&self) -> OrganizationSettings {
        OrganizationSettings {
            email_token: DomainRule {
                enabled: self.email_enabled,
                domain: self.email_domain.value().trim().to_string(),
            },
            google: DomainRule {
                enabled: self.google_enabled,
                domain: self.google_domain.value().trim().to_string(),
            },
            ldap: MembershipToggle {
                enabled: self.ldap_enabled,
            },
            saml: MembershipToggle {
                enabled: self.saml_enabled,
            },
        }
    }
}

/// Render the organization page
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let providers = app.snapshot_or_default().providers;
    let focused = app.organization_form.focused;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(1), // Email toggle
            Constraint::Length(1), // Email domain
            Constraint::Length(1), // Google toggle
            Constraint::Length(1), // Google domain
            Constraint::Length(1), // LDAP toggle
            Constraint::Length(1), // SAML toggle
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(
        "Decide which logins automatically become organization members. \
         Rules for disabled login providers cannot be enabled.",
    ))
    .wrap(Wrap { trim: true });
    frame.render_widget(heading, chunks[0]);

    let form = &app.organization_form;

    render_toggle(
        frame,
        chunks[1],
        "E-mail addresses under a domain",
        form.email_enabled,
        focused == OrgField::EmailToggle,
        providers.email_token,
    );
    render_text_field(
        frame,
        chunks[2],
        "    Domain",
        &form.email_domain,
        focused == OrgField::EmailDomain,
    );

    render_toggle(
        frame,
        chunks[3],
        "Google accounts under a hosted domain",
        form.google_enabled,
        focused == OrgField::GoogleToggle,
        providers.google,
    );
    render_text_field(
        frame,
        chunks[4],
        "    Domain",
        &form.google_domain,
        focused == OrgField::GoogleDomain,
    );

    render_toggle(
        frame,
        chunks[5],
        "Everyone who logs in via LDAP",
        form.ldap_enabled,
        focused == OrgField::LdapToggle,
        providers.ldap,
    );
    render_toggle(
        frame,
        chunks[6],
        "Everyone who logs in via SAML",
        form.saml_enabled,
        focused == OrgField::SamlToggle,
        providers.saml,
    );

    render_feedback(frame, chunks[8], &mut app.organization_form.feedback);

    render_buttons(
        frame,
        chunks[9],
        &[
            ("Back", focused == OrgField::Back, true),
            ("Save and continue", focused == OrgField::Save, true),
        ],
    );
}

/// Handle key input for the organization page
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.organization_form.focused = app.organization_form.focused.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.organization_form.focused = app.organization_form.focused.prev();
        }
        KeyCode::Esc => app.go_back(SetupStep::Organization),
        KeyCode::Char(' ') => {
            let providers = app.snapshot_or_default().providers;
            let form = &mut app.organization_form;
            match form.focused {
                OrgField::EmailToggle if providers.email_token => {
                    form.email_enabled = !form.email_enabled;
                }
                OrgField::GoogleToggle if providers.google => {
                    form.google_enabled = !form.google_enabled;
                }
                OrgField::LdapToggle if providers.ldap => {
                    form.ldap_enabled = !form.ldap_enabled;
                }
                OrgField::SamlToggle if providers.saml => {
                    form.saml_enabled = !form.saml_enabled;
                }
                _ => {
                    if let Some(input) = form.focused_input() {
                        input.insert(' ');
                    }
                }
            }
        }
        KeyCode::Enter => match app.organization_form.focused {
            OrgField::Back => app.go_back(SetupStep::Organization),
            _ => submit(app),
        },
        KeyCode::Backspace => {
            if let Some(input) = app.organization_form.focused_input() {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = app.organization_form.focused_input() {
                input.delete();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.organization_form.focused_input() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.organization_form.focused_input() {
                input.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(input) = app.organization_form.focused_input() {
                input.move_start();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.organization_form.focused_input() {
                input.move_end();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.organization_form.focused_input() {
                input.insert(c);
            }
        }
        _ => {}
    }
}

/// Submit the form; advance only on success
fn submit(app: &mut App) {
    let Some(session) = app.session_token() else {
        app.organization_form
            .feedback
            .set_error("No setup session token is held");
        return;
    };

    let settings = app.organization_form.build_settings();
    match OrganizationService::new(app.storage).save_organization_settings(&session, settings) {
        Ok(()) => app.go_next(SetupStep::Organization),
        Err(e) => app.organization_form.feedback.set_error(e.to_string()),
    }
}
