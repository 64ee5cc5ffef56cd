//! Database commands

use anyhow::{bail, Context, Result};
use masst_core::{ForegroundExit, Invocation};

use crate::app::App;
use crate::cli::DbCommands;
use crate::output;

/// Workspace member holding the Prisma schema
const DATABASE_MEMBER: &str = "packages/database";

pub async fn run(cmd: DbCommands, app: &App) -> Result<()> {
    app.workspace.require_project_root()?;

    match cmd {
        DbCommands::Studio => studio(app).await,
        DbCommands::Migrate { name, deploy } => migrate(app, &name, deploy).await,
        DbCommands::Reset { force } => reset(app, force).await,
        DbCommands::Push => push(app).await,
        DbCommands::Seed { force } => seed(app, force).await,
    }
}

fn prisma(app: &App, args: &[&str]) -> Invocation {
    app.workspace.at_root(
        app.workspace
            .package_manager()
            .exec_in(DATABASE_MEMBER, "prisma", args),
    )
}

async fn studio(app: &App) -> Result<()> {
    output::info("Opening Prisma Studio...");
    output::hint("Studio will open at http://localhost:5555");

    app.handle_interrupts();
    let studio = app.workspace.script("db:studio", &[]);
    let exit = app
        .runner
        .run_foreground(&studio, &app.shutdown, app.grace_period())
        .await?;

    if !exit.is_clean() {
        if let ForegroundExit::Exited { code: Some(code), .. } = exit {
            bail!("Prisma Studio exited with code {}", code);
        }
        bail!("Prisma Studio was terminated by a signal");
    }
    println!();
    output::info("Prisma Studio closed");
    Ok(())
}

async fn migrate(app: &App, name: &str, deploy: bool) -> Result<()> {
    if deploy {
        output::info("Deploying migrations...");
        app.run_inherit(&prisma(app, &["migrate", "deploy"]))
            .await
            .context("Migration deployment failed")?;
        output::success("Migrations deployed!");
    } else {
        output::info(&format!("Creating migration: {}...", name));
        app.run_inherit(&prisma(app, &["migrate", "dev", "--name", name]))
            .await
            .context("Migration failed")?;
        output::success("Migration created and applied!");
    }
    Ok(())
}

async fn reset(app: &App, force: bool) -> Result<()> {
    if !force {
        if !app.prompter.is_interactive() {
            bail!("Refusing to reset the database without confirmation. Re-run with --force.");
        }
        let confirmed = app
            .prompter
            .confirm("This will delete ALL data in your database. Are you sure?", false)?;
        if !confirmed {
            output::info("Operation cancelled.");
            return Ok(());
        }
    }

    output::info("Resetting database...");
    app.run_inherit(&prisma(app, &["migrate", "reset", "--force"]))
        .await
        .context("Database reset failed")?;
    output::success("Database reset complete!");
    Ok(())
}

async fn push(app: &App) -> Result<()> {
    output::info("Pushing schema to database...");
    app.run_inherit(&app.workspace.script("db:push", &[]))
        .await
        .context("Schema push failed")?;
    output::success("Schema pushed!");
    Ok(())
}

async fn seed(app: &App, force: bool) -> Result<()> {
    output::info("Seeding database...");
    let extra: &[&str] = if force { &["--force"] } else { &[] };
    app.run_inherit(&app.workspace.script("db:seed", extra))
        .await
        .context("Seeding failed")?;
    output::success("Database seeded!");
    output::hint(&format!(
        "Demo credentials: {} / {}",
        app.config.handoff.demo_email, app.config.handoff.demo_password
    ));
    Ok(())
}
