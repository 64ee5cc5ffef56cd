//! Logs command

use anyhow::{bail, Result};
use masst_core::ForegroundExit;
use masst_environment::Compose;

use crate::app::App;
use crate::cli::LogsArgs;
use crate::output;

pub async fn run(args: LogsArgs, app: &App) -> Result<()> {
    app.workspace.require_container_manifest()?;
    let compose = Compose::new(&app.config.containers, &app.workspace)?;
    let logs = compose.logs(args.tail_lines, args.follow, args.service.as_deref());

    app.handle_interrupts();
    output::info("Container logs:");

    // Ctrl+C while following is the normal way out
    match app
        .runner
        .run_foreground(&logs, &app.shutdown, app.grace_period())
        .await?
    {
        ForegroundExit::Interrupted | ForegroundExit::Exited { success: true, .. } => Ok(()),
        ForegroundExit::Exited { code, .. } => match code {
            Some(code) => bail!("`{}` exited with code {}", logs, code),
            None => bail!("`{}` was terminated by a signal", logs),
        },
    }
}
