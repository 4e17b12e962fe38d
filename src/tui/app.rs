//! Application state for the wizard TUI
//!
//! The App struct holds all state needed for rendering and handling events:
//! the current page, every page's form state, and the setup session token.

use crate::config::{SessionStore, SessionToken};
use crate::error::SetupResult;
use crate::services::{SpoolMailer, TokenService};
use crate::storage::Storage;
use crate::wizard::{step_after, step_before, ConfigSnapshot, SetupStep, StepGate};

use super::dialogs::test_send::TestSendState;
use super::views::email::EmailFormState;
use super::views::feature_key::FeatureKeyFormState;
use super::views::identity::IdentityFormState;
use super::views::intro::IntroState;
use super::views::organization::OrganizationFormState;
use super::views::user::UserFormState;

/// Which page is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// A wizard step
    Step(SetupStep),
    /// Feature key entry (reached from the intro's extended path)
    FeatureKey,
    /// One-time token redemption in progress or rejected
    TokenVerify { rejected: bool },
    /// No valid setup session
    TokenExpired,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Session token file on this machine
    pub session_store: SessionStore,

    /// Delivery seam for test mail
    pub mailer: SpoolMailer,

    /// The redeemed setup session token, if any
    pub session: Option<SessionToken>,

    /// One-time token passed on the command line, redeemed on first tick
    pub pending_one_time: Option<String>,

    /// Currently shown page
    pub page: Page,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Transient status line message
    pub status_message: Option<String>,

    /// Intro page state
    pub intro: IntroState,

    /// Feature key form state
    pub feature_key_form: FeatureKeyFormState,

    /// Identity step state
    pub identity_form: IdentityFormState,

    /// Organization step form state
    pub organization_form: OrganizationFormState,

    /// Email step form state
    pub email_form: EmailFormState,

    /// User step form state
    pub user_form: UserFormState,

    /// Test-send popup state (open while `Some`)
    pub test_send: Option<TestSendState>,

    /// Focused control on the success page
    pub success_cursor: usize,
}

impl<'a> App<'a> {
    /// Create a new App instance
    ///
    /// With a one-time token the app starts on the verification page and
    /// redeems on the first tick. Otherwise the stored session token decides
    /// between the intro and the expired page.
    pub fn new(
        storage: &'a Storage,
        session_store: SessionStore,
        one_time_token: Option<String>,
    ) -> SetupResult<Self> {
        let mailer = SpoolMailer::new(storage.paths().outbox_dir());

        let mut app = Self {
            storage,
            session_store,
            mailer,
            session: None,
            pending_one_time: None,
            page: Page::TokenExpired,
            should_quit: false,
            status_message: None,
            intro: IntroState::default(),
            feature_key_form: FeatureKeyFormState::default(),
            identity_form: IdentityFormState::default(),
            organization_form: OrganizationFormState::default(),
            email_form: EmailFormState::default(),
            user_form: UserFormState::default(),
            test_send: None,
            success_cursor: 0,
        };

        if let Some(token) = one_time_token {
            app.pending_one_time = Some(token);
            app.page = Page::TokenVerify { rejected: false };
            return Ok(app);
        }

        let session = app.session_store.load()?;
        let valid = session
            .as_ref()
            .map(|t| TokenService::new(storage).session_is_valid(t))
            .unwrap_or(false);

        if valid {
            app.session = session;
            app.open_page(Page::Step(SetupStep::Intro));
        }

        Ok(app)
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// A copy of the session token for service calls
    pub fn session_token(&self) -> Option<SessionToken> {
        self.session.clone()
    }

    /// Take a configuration snapshot, tolerating storage errors in the
    /// render path by falling back to defaults
    pub fn snapshot_or_default(&self) -> ConfigSnapshot {
        self.storage.snapshot().unwrap_or_default()
    }

    /// Whether the extended flow (organization step) is in effect
    pub fn extended_mode(&self) -> bool {
        self.storage
            .config
            .is_feature_key_valid()
            .unwrap_or(false)
    }

    /// Switch to a page, loading its form state from storage
    ///
    /// The analog of navigating to a fresh route: forms are repopulated from
    /// persisted state, focus returns to the first control, and any popup is
    /// closed.
    pub fn open_page(&mut self, page: Page) {
        let config = self.storage.config.get().unwrap_or_default();

        match page {
            Page::Step(SetupStep::Identity) => {
                self.identity_form = IdentityFormState::default();
            }
            Page::Step(SetupStep::Organization) => {
                self.organization_form = OrganizationFormState::from_config(&config);
            }
            Page::Step(SetupStep::Email) => {
                self.email_form = EmailFormState::from_config(&config);
            }
            Page::Step(SetupStep::User) => {
                self.user_form = UserFormState::for_operator(&operator_login());
            }
            Page::FeatureKey => {
                self.feature_key_form = FeatureKeyFormState::from_config(&config);
            }
            Page::Step(SetupStep::Intro) => {
                self.intro = IntroState::default();
            }
            Page::Step(SetupStep::Success) => {
                self.success_cursor = 0;
            }
            _ => {}
        }

        self.test_send = None;
        self.page = page;
    }

    /// Advance to the step after `current` in the active sequence
    ///
    /// The Next control is hidden on the final step, so a `None` from the
    /// sequencer simply leaves the page unchanged.
    pub fn go_next(&mut self, current: SetupStep) {
        if let Some(next) = step_after(current, self.extended_mode()) {
            self.open_page(Page::Step(next));
        }
    }

    /// Return to the step before `current` in the active sequence
    pub fn go_back(&mut self, current: SetupStep) {
        if let Some(prev) = step_before(current, self.extended_mode()) {
            self.open_page(Page::Step(prev));
        }
    }

    /// Jump directly to a step if every earlier step is complete
    pub fn jump_to(&mut self, target: SetupStep) {
        let snapshot = self.snapshot_or_default();
        let gate = StepGate::new(&snapshot);
        if gate.may_jump_to(target, snapshot.feature_key_valid) {
            self.open_page(Page::Step(target));
        }
    }

    /// Redeem the one-time token passed on the command line
    ///
    /// Runs once, off the first tick after startup. Success stores the
    /// session token and lands on the intro; failure flips the verification
    /// page to its rejected state.
    pub fn redeem_pending_token(&mut self) {
        let Some(one_time) = self.pending_one_time.take() else {
            return;
        };

        match TokenService::new(self.storage).redeem(&one_time) {
            Ok(session) => {
                if let Err(e) = self.session_store.store(&session) {
                    self.set_status(format!("Warning: could not save session token: {}", e));
                }
                self.session = Some(session);
                self.open_page(Page::Step(SetupStep::Intro));
            }
            Err(_) => {
                self.page = Page::TokenVerify { rejected: true };
            }
        }
    }
}

/// Login name of the invoking operator
pub fn operator_login() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "admin".to_string())
}
