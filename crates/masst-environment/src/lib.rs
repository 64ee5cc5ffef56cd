//! # masst-environment
//!
//! The `dev` state machine: preflight, container bring-up, readiness wait,
//! client generation, schema application, seeding, and handoff to the
//! foreground dev servers.
//!
//! Each step reports a [`StepOutcome`](masst_core::StepOutcome); which
//! failures abort the session and which only degrade it is decided by
//! [`StepKind::failure_policy`], not by the steps themselves.

pub mod containers;
pub mod orchestrator;
pub mod reporter;
pub mod seed;
pub mod session;
pub mod step;
pub mod steps;

pub use containers::Compose;
pub use orchestrator::{Abort, Orchestrator, SessionReport, StepRecord, INTERRUPTED_EXIT_CODE};
pub use reporter::{Reporter, SilentReporter};
pub use seed::{classify_seed_output, SeedOutcome};
pub use session::{DevOptions, OrchestrationSession};
pub use step::{FailurePolicy, HandoffExit, Step, StepDetail, StepEnv, StepKind, StepReport};
