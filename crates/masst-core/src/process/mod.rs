//! Subprocess capability
//!
//! Every external tool call (container runtime, schema tool, package manager,
//! platform CLI) goes through [`ProcessRunner`], so orchestration logic can be
//! exercised against a recording fake instead of real processes.

mod system;

#[cfg(any(test, feature = "test-utils"))]
mod recording;

pub use system::SystemRunner;

#[cfg(any(test, feature = "test-utils"))]
pub use recording::{CallKind, RecordedCall, RecordingRunner};

use crate::error::{Error, Result};
use crate::shutdown::Shutdown;
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::time::Duration;

/// A program plus its arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<Utf8PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build from a command vector such as `["docker", "compose"]`
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, rest) = command.split_first()?;
        Some(Self::new(program.as_str()).args(rest))
    }

    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Utf8Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Whether the child shares the terminal or has its output captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Inherit,
    Capture,
}

/// Result of a completed process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    /// Empty unless captured
    pub stdout: String,
    /// Empty unless captured
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }

    pub fn status_description(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }

    /// Turn an unsuccessful exit into [`Error::ToolFailed`]
    pub fn check(self, invocation: &Invocation) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::tool_failed(
                invocation.to_string(),
                self.status_description(),
            ))
        }
    }
}

/// How a foreground process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundExit {
    /// The process exited on its own
    Exited { success: bool, code: Option<i32> },
    /// Shutdown was requested while it ran
    Interrupted,
}

impl ForegroundExit {
    /// True for a successful exit or a user interrupt
    pub fn is_clean(&self) -> bool {
        matches!(
            self,
            ForegroundExit::Interrupted | ForegroundExit::Exited { success: true, .. }
        )
    }
}

/// Capability for running external programs
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion.
    ///
    /// A non-zero exit is reported in the output, not as an error; only
    /// failure to start the program is an `Err`.
    async fn run(&self, invocation: &Invocation, mode: OutputMode) -> Result<ProcessOutput>;

    /// Run attached to the terminal until it exits or `shutdown` fires.
    ///
    /// After shutdown the child gets `grace` to exit before it is killed.
    async fn run_foreground(
        &self,
        invocation: &Invocation,
        shutdown: &Shutdown,
        grace: Duration,
    ) -> Result<ForegroundExit>;

    /// Quietly run a trivial command (e.g. `fly version`); true if it succeeded
    async fn probe(&self, program: &str, args: &[&str]) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("docker")
            .args(["compose", "up"])
            .arg("-d")
            .current_dir("/tmp/app");
        assert_eq!(inv.to_string(), "docker compose up -d");
        assert_eq!(inv.cwd(), Some(Utf8Path::new("/tmp/app")));
    }

    #[test]
    fn test_from_command() {
        let cmd = vec!["docker".to_string(), "compose".to_string()];
        let inv = Invocation::from_command(&cmd).unwrap().arg("down");
        assert_eq!(inv.program(), "docker");
        assert_eq!(inv.get_args(), ["compose", "down"]);
        assert!(Invocation::from_command(&[]).is_none());
    }

    #[test]
    fn test_check_maps_failure() {
        let inv = Invocation::new("pnpm").arg("build");
        let err = ProcessOutput::failure(2, "boom").check(&inv).unwrap_err();
        assert_eq!(err.to_string(), "`pnpm build` failed (exit code 2)");
        assert!(ProcessOutput::success("").check(&inv).is_ok());
    }

    #[test]
    fn test_foreground_exit_cleanliness() {
        assert!(ForegroundExit::Interrupted.is_clean());
        assert!(!ForegroundExit::Exited {
            success: false,
            code: Some(1)
        }
        .is_clean());
    }
}
