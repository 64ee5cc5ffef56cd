//! Platform trait definitions

use crate::target::PlatformTarget;
use async_trait::async_trait;
use masst_core::{ProcessRunner, Prompter, StepOutcome, WorkspaceContext};

/// An external CLI a platform needs before it can deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
    /// Name shown to the user
    pub name: &'static str,
    pub program: &'static str,
    /// Arguments of a harmless version probe
    pub probe_args: &'static [&'static str],
    /// Actionable install instructions
    pub install_hint: &'static str,
}

/// Result of probing every prerequisite of a platform
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteStatus {
    pub satisfied: bool,
    pub missing: Vec<Prerequisite>,
}

/// Everything a deployment procedure may touch
pub struct DeployContext<'a> {
    pub workspace: &'a WorkspaceContext,
    pub runner: &'a dyn ProcessRunner,
    pub prompter: &'a dyn Prompter,
    /// Image tag
    pub tag: &'a str,
    /// Container image build program
    pub build_program: &'a str,
}

/// What a deployment procedure did
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub target: PlatformTarget,
    pub outcome: StepOutcome,
    /// Images built, only populated when every build succeeded
    pub images: Vec<String>,
    /// Informational lines for the user
    pub notes: Vec<String>,
    /// Suggested follow-up commands
    pub next_steps: Vec<String>,
}

impl DeployReport {
    pub fn success(target: PlatformTarget) -> Self {
        Self {
            target,
            outcome: StepOutcome::Success,
            images: Vec::new(),
            notes: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn fatal(target: PlatformTarget, message: impl Into<String>) -> Self {
        Self {
            outcome: StepOutcome::fatal(message),
            ..Self::success(target)
        }
    }

    pub fn is_success(&self) -> bool {
        !self.outcome.is_fatal()
    }
}

/// Deployment procedure for one target
#[async_trait]
pub trait Platform: Send + Sync {
    fn target(&self) -> PlatformTarget;

    /// External CLIs that must be installed
    fn prerequisites(&self) -> Vec<Prerequisite> {
        Vec::new()
    }

    /// Probe every prerequisite; nothing is mutated
    async fn check_prerequisites(&self, runner: &dyn ProcessRunner) -> PrerequisiteStatus {
        let mut missing = Vec::new();
        for prerequisite in self.prerequisites() {
            if !runner
                .probe(prerequisite.program, prerequisite.probe_args)
                .await
            {
                missing.push(prerequisite);
            }
        }
        PrerequisiteStatus {
            satisfied: missing.is_empty(),
            missing,
        }
    }

    /// Run the deployment; prerequisites have already been checked
    async fn deploy(&self, cx: &DeployContext<'_>) -> DeployReport;
}
