//! In-memory runner for tests
//!
//! Records every call and answers from scripted responses matched by command
//! prefix. Unscripted commands succeed with empty output.

use super::{ForegroundExit, Invocation, OutputMode, ProcessOutput, ProcessRunner};
use crate::error::{Error, Result};
use crate::shutdown::Shutdown;
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::collections::{HashSet, VecDeque};
use std::io;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Run(OutputMode),
    Foreground,
    Probe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: CallKind,
    /// Rendered command line
    pub command: String,
    pub cwd: Option<Utf8PathBuf>,
}

struct Script {
    prefix: String,
    outputs: VecDeque<ProcessOutput>,
}

#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    scripts: Mutex<Vec<Script>>,
    missing: Mutex<HashSet<String>>,
    hold_foreground: Mutex<bool>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands starting with `prefix` with `outputs` in order; the
    /// last output repeats once the queue is down to one.
    pub fn respond<I>(self, prefix: &str, outputs: I) -> Self
    where
        I: IntoIterator<Item = ProcessOutput>,
    {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.push(Script {
                prefix: prefix.to_string(),
                outputs: outputs.into_iter().collect(),
            });
        }
        self
    }

    /// Treat `program` as not installed
    pub fn without_program(self, program: &str) -> Self {
        if let Ok(mut missing) = self.missing.lock() {
            missing.insert(program.to_string());
        }
        self
    }

    /// Keep foreground processes running until shutdown fires
    pub fn holding_foreground(self) -> Self {
        if let Ok(mut hold) = self.hold_foreground.lock() {
            *hold = true;
        }
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Rendered command lines in call order
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// How many recorded commands start with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, kind: CallKind, command: String, cwd: Option<Utf8PathBuf>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall { kind, command, cwd });
        }
    }

    fn is_missing(&self, program: &str) -> bool {
        self.missing
            .lock()
            .map(|m| m.contains(program))
            .unwrap_or(false)
    }

    fn next_output(&self, command: &str) -> ProcessOutput {
        let Ok(mut scripts) = self.scripts.lock() else {
            return ProcessOutput::success("");
        };
        match scripts.iter_mut().find(|s| command.starts_with(&s.prefix)) {
            Some(script) if script.outputs.len() > 1 => {
                script.outputs.pop_front().unwrap_or_default()
            }
            Some(script) => script
                .outputs
                .front()
                .cloned()
                .unwrap_or_else(|| ProcessOutput::success("")),
            None => ProcessOutput::success(""),
        }
    }

    fn spawn_error(invocation: &Invocation) -> Error {
        Error::Spawn {
            command: invocation.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
        }
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation, mode: OutputMode) -> Result<ProcessOutput> {
        let command = invocation.to_string();
        self.record(
            CallKind::Run(mode),
            command.clone(),
            invocation.cwd().map(|p| p.to_path_buf()),
        );
        if self.is_missing(invocation.program()) {
            return Err(Self::spawn_error(invocation));
        }
        let mut output = self.next_output(&command);
        if mode == OutputMode::Inherit {
            output.stdout.clear();
            output.stderr.clear();
        }
        Ok(output)
    }

    async fn run_foreground(
        &self,
        invocation: &Invocation,
        shutdown: &Shutdown,
        _grace: Duration,
    ) -> Result<ForegroundExit> {
        let command = invocation.to_string();
        self.record(
            CallKind::Foreground,
            command.clone(),
            invocation.cwd().map(|p| p.to_path_buf()),
        );
        if self.is_missing(invocation.program()) {
            return Err(Self::spawn_error(invocation));
        }
        let hold = self.hold_foreground.lock().map(|h| *h).unwrap_or(false);
        if hold {
            shutdown.wait().await;
            return Ok(ForegroundExit::Interrupted);
        }
        let output = self.next_output(&command);
        Ok(ForegroundExit::Exited {
            success: output.success,
            code: output.code,
        })
    }

    async fn probe(&self, program: &str, args: &[&str]) -> bool {
        let invocation = Invocation::new(program).args(args.iter().copied());
        let command = invocation.to_string();
        self.record(CallKind::Probe, command.clone(), None);
        !self.is_missing(program) && self.next_output(&command).success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_outputs_in_order_then_sticky() {
        let runner = RecordingRunner::new().respond(
            "docker compose exec",
            [ProcessOutput::failure(1, ""), ProcessOutput::success("ok")],
        );
        let inv = Invocation::new("docker").args(["compose", "exec", "-T", "postgres"]);

        assert!(!runner.run(&inv, OutputMode::Capture).await.unwrap().success);
        assert!(runner.run(&inv, OutputMode::Capture).await.unwrap().success);
        assert!(runner.run(&inv, OutputMode::Capture).await.unwrap().success);
        assert_eq!(runner.count("docker compose exec"), 3);
    }

    #[tokio::test]
    async fn test_missing_program() {
        let runner = RecordingRunner::new().without_program("fly");
        assert!(!runner.probe("fly", &["version"]).await);
        assert!(runner.probe("git", &["--version"]).await);
        assert_eq!(runner.commands(), vec!["fly version", "git --version"]);
    }
}
