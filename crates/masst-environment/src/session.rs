//! Per-invocation `dev` session

use masst_core::WorkspaceContext;

/// Flags given to `dev`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DevOptions {
    pub no_containers: bool,
    pub seed: bool,
    pub reset: bool,
}

/// What this run of `dev` will do. Owns no durable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestrationSession {
    pub has_container_manifest: bool,
    pub use_containers: bool,
    pub force_seed: bool,
    pub reset_first: bool,
}

impl OrchestrationSession {
    pub fn new(ctx: &WorkspaceContext, options: DevOptions) -> Self {
        Self {
            has_container_manifest: ctx.has_container_manifest(),
            use_containers: !options.no_containers,
            force_seed: options.seed,
            reset_first: options.reset,
        }
    }

    /// Container and readiness steps run only with a manifest and no opt-out
    pub fn manages_containers(&self) -> bool {
        self.has_container_manifest && self.use_containers
    }

    /// Seed in forced mode instead of letting the seed script decide
    pub fn forces_seed(&self) -> bool {
        self.force_seed || self.reset_first
    }
}
