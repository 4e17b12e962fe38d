//! End-to-end setup flow tests
//!
//! Drives the service layer the way the wizard does and checks the gating
//! policy against the resulting configuration.

use tempfile::TempDir;

use caravel_setup::config::{CaravelPaths, SessionStore, SessionToken};
use caravel_setup::models::{
    FeatureKey, FeatureKeyPayload, Provider, SmtpAuth, SmtpConfig,
};
use caravel_setup::services::{
    AdminService, MailService, SettingsService, SpoolMailer, TokenService,
};
use caravel_setup::storage::Storage;
use caravel_setup::wizard::{step_after, SetupStep, StepGate};

struct Harness {
    storage: Storage,
    session: SessionToken,
    session_store: SessionStore,
    _temp: TempDir,
}

fn harness() -> Harness {
    let temp = TempDir::new().unwrap();
    let paths = CaravelPaths::with_base_dir(temp.path().to_path_buf());
    let storage = Storage::new(paths.clone()).unwrap();
    storage.load_all().unwrap();

    let tokens = TokenService::new(&storage);
    let one_time = tokens.mint_one_time().unwrap();
    let session = tokens.redeem(&one_time).unwrap();

    let session_store = SessionStore::new(paths);
    session_store.store(&session).unwrap();

    Harness {
        storage,
        session,
        session_store,
        _temp: temp,
    }
}

fn populated_smtp() -> SmtpConfig {
    SmtpConfig {
        hostname: "mail.example.com".into(),
        port: 587,
        auth: SmtpAuth::default(),
        return_address: "caravel@example.com".into(),
    }
}

#[test]
fn identity_step_blocks_progress_until_a_provider_is_enabled() {
    let h = harness();

    let snapshot = h.storage.snapshot().unwrap();
    let gate = StepGate::new(&snapshot);
    assert!(gate.may_jump_to(SetupStep::Identity, false));
    assert!(!gate.may_jump_to(SetupStep::Email, false));

    SettingsService::new(&h.storage)
        .set_provider_enabled(&h.session, Provider::Github, true)
        .unwrap();

    let snapshot = h.storage.snapshot().unwrap();
    let gate = StepGate::new(&snapshot);
    assert!(gate.may_jump_to(SetupStep::Email, false));
    // GitHub login needs no outbound mail, so nothing blocks the tail
    assert!(gate.may_jump_to(SetupStep::Success, false));
}

#[test]
fn email_login_holds_the_email_step_until_mail_works() {
    let h = harness();

    SettingsService::new(&h.storage)
        .set_provider_enabled(&h.session, Provider::EmailToken, true)
        .unwrap();

    let snapshot = h.storage.snapshot().unwrap();
    let gate = StepGate::new(&snapshot);
    assert!(gate.may_jump_to(SetupStep::Email, false));
    assert!(!gate.may_jump_to(SetupStep::User, false));

    // Submitting a config with an empty hostname fails and changes nothing
    let mailer = SpoolMailer::new(h.storage.paths().outbox_dir());
    let mail = MailService::new(&h.storage, &mailer);

    let broken = SmtpConfig {
        hostname: String::new(),
        ..populated_smtp()
    };
    assert!(mail.set_smtp_config(&h.session, broken).is_err());

    let snapshot = h.storage.snapshot().unwrap();
    assert!(!StepGate::new(&snapshot).may_jump_to(SetupStep::User, false));

    // A working config unblocks the rest of the sequence
    mail.set_smtp_config(&h.session, populated_smtp()).unwrap();

    let snapshot = h.storage.snapshot().unwrap();
    assert!(StepGate::new(&snapshot).may_jump_to(SetupStep::Success, false));
}

#[test]
fn feature_key_switches_to_the_extended_sequence() {
    let h = harness();

    let snapshot = h.storage.snapshot().unwrap();
    assert!(!snapshot.feature_key_valid);
    assert_eq!(
        step_after(SetupStep::Identity, snapshot.feature_key_valid),
        Some(SetupStep::Email)
    );

    let raw = FeatureKey::encode(&FeatureKeyPayload {
        organization: "Example Corp".into(),
        expires: chrono::Utc::now() + chrono::Duration::days(30),
    })
    .unwrap();
    SettingsService::new(&h.storage)
        .save_feature_key(&h.session, &raw)
        .unwrap();

    let snapshot = h.storage.snapshot().unwrap();
    assert!(snapshot.feature_key_valid);
    assert_eq!(
        step_after(SetupStep::Identity, snapshot.feature_key_valid),
        Some(SetupStep::Organization)
    );
}

#[test]
fn claiming_admin_finishes_setup_and_forgets_the_session_file() {
    let h = harness();

    let snapshot = h.storage.snapshot().unwrap();
    assert!(!snapshot.has_admin);
    assert!(!snapshot.has_users);

    AdminService::new(&h.storage)
        .sign_up_as_admin(&h.session, "operator", "The Operator")
        .unwrap();

    // The wizard clears the session file after a successful claim
    h.session_store.clear().unwrap();

    let snapshot = h.storage.snapshot().unwrap();
    assert!(snapshot.has_admin);
    assert!(snapshot.has_users);
    assert!(h.session_store.load().unwrap().is_none());

    // The server-side session record stays live for the rest of the sitting
    TokenService::new(&h.storage)
        .verify_session(&h.session)
        .unwrap();
}

#[test]
fn operations_reject_a_revoked_session() {
    let h = harness();

    TokenService::new(&h.storage).revoke_all().unwrap();

    let err = SettingsService::new(&h.storage)
        .set_provider_enabled(&h.session, Provider::Ldap, true)
        .unwrap_err();
    assert!(err.is_token());

    let snapshot = h.storage.snapshot().unwrap();
    assert!(!snapshot.providers.ldap);
}
