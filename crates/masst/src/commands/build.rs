//! Build command

use anyhow::{Context, Result};

use crate::app::App;
use crate::output;

pub async fn run(app: &App) -> Result<()> {
    app.workspace.require_project_root()?;

    output::header("Building for production");

    app.run_inherit(&app.workspace.script("db:generate", &[]))
        .await
        .context("Failed to generate database client")?;
    app.run_inherit(&app.workspace.script("build", &[]))
        .await
        .context("Build failed")?;

    output::success("Build complete!");
    Ok(())
}
