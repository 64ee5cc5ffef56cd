//! Collaborators shared by every command

use crate::cli::Cli;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use masst_core::{
    Invocation, OutputMode, ProcessRunner, Prompter, RuntimeConfig, RuntimeConfigLoader,
    Shutdown, SystemRunner, TerminalPrompter, WorkspaceContext,
};
use std::sync::Arc;
use std::time::Duration;

pub struct App {
    pub config: RuntimeConfig,
    pub workspace: WorkspaceContext,
    pub runner: Arc<dyn ProcessRunner>,
    pub prompter: Arc<dyn Prompter>,
    pub shutdown: Shutdown,
    directory: Utf8PathBuf,
}

impl App {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = RuntimeConfigLoader::new()
            .load()
            .context("Failed to load runtime configuration")?;
        let workspace = WorkspaceContext::inspect(cli.directory.clone(), &config.workspace);

        Ok(Self {
            config,
            workspace,
            runner: Arc::new(SystemRunner::new()),
            prompter: Arc::new(TerminalPrompter::new(cli.yes)),
            shutdown: Shutdown::new(),
            directory: cli.directory.clone(),
        })
    }

    /// Directory the command was pointed at
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Run with the terminal attached; a non-zero exit is an error
    pub async fn run_inherit(&self, invocation: &Invocation) -> masst_core::Result<()> {
        self.runner
            .run(invocation, OutputMode::Inherit)
            .await?
            .check(invocation)?;
        Ok(())
    }

    /// Route Ctrl+C to [`App::shutdown`] for long-running commands
    pub fn handle_interrupts(&self) {
        // The listener lives until the process exits
        let _ = self.shutdown.listen_for_ctrl_c();
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.config.handoff.grace_period_ms)
    }
}
