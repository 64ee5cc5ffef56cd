//! Step vocabulary for the `dev` state machine

use crate::reporter::Reporter;
use crate::seed::SeedOutcome;
use crate::session::OrchestrationSession;
use async_trait::async_trait;
use masst_core::{ProcessRunner, RuntimeConfig, Shutdown, StepOutcome, WorkspaceContext};
use std::fmt;
use std::sync::Arc;

/// The steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Preflight,
    ContainerUp,
    Readiness,
    Generate,
    ApplySchema,
    Seed,
    Handoff,
}

/// What a failed step does to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop; no later step runs
    Abort,
    /// Report a warning and continue
    Degrade,
}

impl StepKind {
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            StepKind::Readiness | StepKind::Seed => FailurePolicy::Degrade,
            StepKind::Preflight
            | StepKind::ContainerUp
            | StepKind::Generate
            | StepKind::ApplySchema
            | StepKind::Handoff => FailurePolicy::Abort,
        }
    }

    /// Whether the step watches for shutdown itself instead of being raced
    pub fn owns_shutdown(&self) -> bool {
        matches!(self, StepKind::Handoff)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Preflight => "Checking project",
            StepKind::ContainerUp => "Starting containers",
            StepKind::Readiness => "Waiting for database",
            StepKind::Generate => "Generating database client",
            StepKind::ApplySchema => "Applying database schema",
            StepKind::Seed => "Seeding database",
            StepKind::Handoff => "Starting dev servers",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a foreground handoff ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffExit {
    Exited,
    Interrupted,
}

/// Step-specific facts worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDetail {
    Readiness { attempts: u32 },
    Schema { fell_back: bool },
    Seed(SeedOutcome),
    Handoff(HandoffExit),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: StepOutcome,
    pub detail: Option<StepDetail>,
}

impl StepReport {
    pub fn success() -> Self {
        Self {
            outcome: StepOutcome::Success,
            detail: None,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            outcome: StepOutcome::fatal(message),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: StepDetail) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Shared collaborators every step can use
#[derive(Clone)]
pub struct StepEnv {
    pub ctx: WorkspaceContext,
    pub config: RuntimeConfig,
    pub session: OrchestrationSession,
    pub runner: Arc<dyn ProcessRunner>,
    pub shutdown: Shutdown,
    pub reporter: Arc<dyn Reporter>,
}

/// One unit of the state machine
#[async_trait]
pub trait Step: Send + Sync {
    fn kind(&self) -> StepKind;

    /// Run the step. Failures are `Fatal`; the orchestrator applies the
    /// step's [`FailurePolicy`].
    async fn run(&self, env: &StepEnv) -> StepReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_policy_table() {
        let degrading: Vec<StepKind> = [
            StepKind::Preflight,
            StepKind::ContainerUp,
            StepKind::Readiness,
            StepKind::Generate,
            StepKind::ApplySchema,
            StepKind::Seed,
            StepKind::Handoff,
        ]
        .into_iter()
        .filter(|k| k.failure_policy() == FailurePolicy::Degrade)
        .collect();
        assert_eq!(degrading, vec![StepKind::Readiness, StepKind::Seed]);
    }
}
