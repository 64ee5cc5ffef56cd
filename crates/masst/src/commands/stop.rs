//! Stop command

use anyhow::{Context, Result};
use masst_environment::Compose;

use crate::app::App;
use crate::output;

pub async fn run(app: &App) -> Result<()> {
    app.workspace.require_container_manifest()?;
    let compose = Compose::new(&app.config.containers, &app.workspace)?;

    output::info("Stopping containers...");
    app.run_inherit(&compose.down())
        .await
        .context("Failed to stop containers")?;

    output::success("Containers stopped");
    Ok(())
}
