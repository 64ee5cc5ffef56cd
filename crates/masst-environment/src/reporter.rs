//! Progress callbacks for the `dev` session

use crate::step::{StepKind, StepReport};
use masst_core::types::HandoffConfig;

/// Receives progress while the orchestrator runs. All methods default to no-ops.
pub trait Reporter: Send + Sync {
    fn step_started(&self, _kind: StepKind) {}

    fn step_finished(&self, _kind: StepKind, _report: &StepReport) {}

    /// A readiness probe attempt is about to run
    fn readiness_attempt(&self, _attempt: u32, _max_attempts: u32) {}

    /// Called right before the dev servers take over the terminal
    fn handoff(&self, _summary: &HandoffConfig) {}
}

/// Reporter that prints nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
