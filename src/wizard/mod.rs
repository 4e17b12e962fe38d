//! Wizard sequencing
//!
//! Pure step-ordering and gating logic, consulted by the TUI to decide
//! navigation targets and which steps may be jumped to directly.

pub mod snapshot;
pub mod step;

pub use snapshot::ConfigSnapshot;
pub use step::{
    active_steps, step_after, step_before, SetupStep, StepGate, EXTENDED_STEPS, STANDARD_STEPS,
};
