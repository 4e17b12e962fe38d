//! Wizard step sequencing and gating
//!
//! The ordered list of setup steps, next/previous lookup, and the per-step
//! completion predicates that decide how far ahead a user may jump. Two
//! fixed sequences exist: the standard five-step flow, and the extended
//! six-step flow (with the organization step) used when a valid feature key
//! is on record.

use serde::{Deserialize, Serialize};

use super::snapshot::ConfigSnapshot;

/// A step of the setup wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStep {
    Intro,
    Identity,
    Organization,
    Email,
    User,
    Success,
}

/// The standard flow: identity is immediately followed by email
pub const STANDARD_STEPS: [SetupStep; 5] = [
    SetupStep::Intro,
    SetupStep::Identity,
    SetupStep::Email,
    SetupStep::User,
    SetupStep::Success,
];

/// The extended flow, unlocked by a valid feature key
pub const EXTENDED_STEPS: [SetupStep; 6] = [
    SetupStep::Intro,
    SetupStep::Identity,
    SetupStep::Organization,
    SetupStep::Email,
    SetupStep::User,
    SetupStep::Success,
];

/// The sequence in effect for the given mode
pub fn active_steps(extended: bool) -> &'static [SetupStep] {
    if extended {
        &EXTENDED_STEPS
    } else {
        &STANDARD_STEPS
    }
}

/// The step following `current` in the active sequence
///
/// `None` when `current` is the last step or absent from the sequence. The
/// UI hides the Next control at the end of the sequence, so `None` marks a
/// caller bug rather than a user-visible state.
pub fn step_after(current: SetupStep, extended: bool) -> Option<SetupStep> {
    let steps = active_steps(extended);
    let idx = steps.iter().position(|s| *s == current)?;
    steps.get(idx + 1).copied()
}

/// The step preceding `current` in the active sequence
///
/// `None` at the front of the sequence, with the same caveat as
/// [`step_after`].
pub fn step_before(current: SetupStep, extended: bool) -> Option<SetupStep> {
    let steps = active_steps(extended);
    let idx = steps.iter().position(|s| *s == current)?;
    idx.checked_sub(1).map(|prev| steps[prev])
}

impl SetupStep {
    /// Title shown in the progress header
    pub fn title(&self) -> &'static str {
        match self {
            SetupStep::Intro => "Introduction",
            SetupStep::Identity => "Identity providers",
            SetupStep::Organization => "Organization",
            SetupStep::Email => "E-mail",
            SetupStep::User => "Admin account",
            SetupStep::Success => "Finish",
        }
    }
}

impl std::fmt::Display for SetupStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Evaluates step completion against a configuration snapshot
#[derive(Debug, Clone, Copy)]
pub struct StepGate<'a> {
    snapshot: &'a ConfigSnapshot,
}

impl<'a> StepGate<'a> {
    /// Create a gate over the given snapshot
    pub fn new(snapshot: &'a ConfigSnapshot) -> Self {
        Self { snapshot }
    }

    /// Whether the given step counts as completed
    ///
    /// Identity requires at least one enabled provider. E-mail may be
    /// skipped unless passwordless e-mail login is enabled, in which case a
    /// fully populated mail configuration must be on record. Every other
    /// step is unconditionally complete.
    pub fn is_complete(&self, step: SetupStep) -> bool {
        match step {
            SetupStep::Identity => self.snapshot.providers.any_enabled(),
            SetupStep::Email => {
                if self.snapshot.providers.email_token {
                    self.snapshot.smtp_fully_populated()
                } else {
                    true
                }
            }
            SetupStep::Intro
            | SetupStep::Organization
            | SetupStep::User
            | SetupStep::Success => true,
        }
    }

    /// Whether the user may jump directly to `target`
    ///
    /// Walks the active sequence from the front: reaching `target` permits
    /// the jump; an incomplete earlier step forbids it. Prerequisites are
    /// strictly sequential, not a general dependency graph.
    pub fn may_jump_to(&self, target: SetupStep, extended: bool) -> bool {
        for step in active_steps(extended) {
            if *step == target {
                return true;
            }

            if !self.is_complete(*step) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProviderFlags, SmtpConfig};

    fn snapshot_with(providers: ProviderFlags, smtp: Option<SmtpConfig>) -> ConfigSnapshot {
        ConfigSnapshot {
            providers,
            smtp,
            ..Default::default()
        }
    }

    fn populated_smtp() -> SmtpConfig {
        SmtpConfig {
            hostname: "mail.example.com".into(),
            port: 587,
            auth: Default::default(),
            return_address: "caravel@example.com".into(),
        }
    }

    #[test]
    fn test_standard_sequence_order() {
        assert_eq!(
            step_after(SetupStep::Identity, false),
            Some(SetupStep::Email)
        );
        assert_eq!(step_before(SetupStep::Email, false), Some(SetupStep::Identity));
    }

    #[test]
    fn test_extended_sequence_inserts_organization() {
        assert_eq!(
            step_after(SetupStep::Identity, true),
            Some(SetupStep::Organization)
        );
        assert_eq!(
            step_after(SetupStep::Organization, true),
            Some(SetupStep::Email)
        );
    }

    #[test]
    fn test_sequence_boundaries() {
        assert_eq!(step_before(SetupStep::Intro, false), None);
        assert_eq!(step_after(SetupStep::Success, false), None);
        assert_eq!(step_before(SetupStep::Intro, true), None);
        assert_eq!(step_after(SetupStep::Success, true), None);
    }

    #[test]
    fn test_organization_absent_from_standard_flow() {
        assert_eq!(step_after(SetupStep::Organization, false), None);
        assert!(!STANDARD_STEPS.contains(&SetupStep::Organization));
    }

    #[test]
    fn test_sequences_have_unique_members() {
        for steps in [&STANDARD_STEPS[..], &EXTENDED_STEPS[..]] {
            for (i, step) in steps.iter().enumerate() {
                assert_eq!(steps.iter().position(|s| s == step), Some(i));
            }
        }
    }

    #[test]
    fn test_identity_complete_iff_any_provider() {
        let none = snapshot_with(ProviderFlags::default(), None);
        assert!(!StepGate::new(&none).is_complete(SetupStep::Identity));

        for provider in crate::models::Provider::ALL {
            let mut flags = ProviderFlags::default();
            flags.set_enabled(provider, true);
            let snapshot = snapshot_with(flags, None);
            assert!(
                StepGate::new(&snapshot).is_complete(SetupStep::Identity),
                "{} should satisfy the identity step",
                provider
            );
        }
    }

    #[test]
    fn test_email_skippable_without_email_token() {
        let mut flags = ProviderFlags::default();
        flags.google = true;

        let snapshot = snapshot_with(flags, None);
        assert!(StepGate::new(&snapshot).is_complete(SetupStep::Email));
    }

    #[test]
    fn test_email_requires_config_with_email_token() {
        let mut flags = ProviderFlags::default();
        flags.email_token = true;

        let missing = snapshot_with(flags, None);
        assert!(!StepGate::new(&missing).is_complete(SetupStep::Email));

        let partial = snapshot_with(
            flags,
            Some(SmtpConfig {
                hostname: String::new(),
                ..populated_smtp()
            }),
        );
        assert!(!StepGate::new(&partial).is_complete(SetupStep::Email));

        let full = snapshot_with(flags, Some(populated_smtp()));
        assert!(StepGate::new(&full).is_complete(SetupStep::Email));
    }

    #[test]
    fn test_jump_blocked_by_identity() {
        let snapshot = snapshot_with(ProviderFlags::default(), None);
        let gate = StepGate::new(&snapshot);

        assert!(gate.may_jump_to(SetupStep::Intro, false));
        assert!(gate.may_jump_to(SetupStep::Identity, false));
        assert!(!gate.may_jump_to(SetupStep::Email, false));
        assert!(!gate.may_jump_to(SetupStep::User, false));
        assert!(!gate.may_jump_to(SetupStep::Success, false));
    }

    #[test]
    fn test_jump_monotonic() {
        // For a grab bag of snapshots: every step before a reachable step is
        // itself reachable, in both modes.
        let mut email_only = ProviderFlags::default();
        email_only.email_token = true;

        let mut ldap_only = ProviderFlags::default();
        ldap_only.ldap = true;

        let snapshots = [
            snapshot_with(ProviderFlags::default(), None),
            snapshot_with(email_only, None),
            snapshot_with(email_only, Some(populated_smtp())),
            snapshot_with(ldap_only, None),
        ];

        for snapshot in &snapshots {
            let gate = StepGate::new(snapshot);
            for extended in [false, true] {
                let steps = active_steps(extended);
                for (i, step) in steps.iter().enumerate() {
                    if gate.may_jump_to(*step, extended) {
                        for earlier in &steps[..i] {
                            assert!(
                                gate.may_jump_to(*earlier, extended),
                                "jump to {:?} allowed but {:?} blocked",
                                step,
                                earlier
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_jump_unblocked_once_identity_configured() {
        let mut flags = ProviderFlags::default();
        flags.github = true;

        let snapshot = snapshot_with(flags, None);
        let gate = StepGate::new(&snapshot);

        // GitHub login alone satisfies identity, and e-mail stays skippable.
        assert!(gate.may_jump_to(SetupStep::Success, false));
    }
}
