//! # masst-core
//!
//! Core library for the masst CLI providing:
//! - Runtime configuration with layered precedence (runtime.yaml)
//! - The subprocess capability every external tool call goes through
//! - Retry execution engine used by readiness polling
//! - Workspace inspection and package-manager resolution
//! - Shutdown signalling shared by long-running commands

pub mod config;
pub mod error;
pub mod package_manager;
pub mod process;
pub mod prompt;
pub mod retry;
pub mod shutdown;
pub mod types;
pub mod workspace;

pub use config::RuntimeConfigLoader;
pub use error::{Error, ErrorCategory, Result};
pub use package_manager::PackageManager;
pub use process::{
    ForegroundExit, Invocation, OutputMode, ProcessOutput, ProcessRunner, SystemRunner,
};
pub use prompt::{Prompter, TerminalPrompter};
pub use shutdown::Shutdown;
pub use types::{RuntimeConfig, StepOutcome};
pub use workspace::WorkspaceContext;

#[cfg(any(test, feature = "test-utils"))]
pub use process::RecordingRunner;
#[cfg(any(test, feature = "test-utils"))]
pub use prompt::ScriptedPrompter;
