//! masst CLI - scaffold, run, and ship full-stack SaaS projects
//!
//! This is the main entry point for the `mst` command-line interface.

mod app;
mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(code) => code,
        Err(err) if is_cancelled(&err) => {
            output::info("Operation cancelled.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            output::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if let Commands::Completions(args) = &cli.command {
        commands::completions::run(args);
        return Ok(ExitCode::SUCCESS);
    }

    let app = App::load(&cli)?;
    let done = |_: ()| ExitCode::SUCCESS;

    match cli.command {
        Commands::Init(args) => commands::init::run(args, &app).await.map(done),
        Commands::Dev(args) => commands::dev::run(args, &app).await,
        Commands::Build => commands::build::run(&app).await.map(done),
        Commands::Deploy(args) => commands::deploy::run(args, &app).await.map(done),
        Commands::Stop => commands::stop::run(&app).await.map(done),
        Commands::Logs(args) => commands::logs::run(args, &app).await.map(done),
        Commands::Db(cmd) => commands::db::run(cmd, &app).await.map(done),
        Commands::Upgrade(args) => commands::upgrade::run(args, &app).await.map(done),
        Commands::Add(cmd) => commands::add::run(cmd, &app).await.map(done),
        Commands::Install(args) => commands::install::run(args, &app).await.map(done),
        Commands::Completions(_) => Ok(ExitCode::SUCCESS),
    }
}

/// Whether the user backed out of a prompt somewhere in the error chain
fn is_cancelled(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<masst_core::Error>()
            .is_some_and(masst_core::Error::is_cancelled)
            || cause
                .downcast_ref::<masst_projects::Error>()
                .is_some_and(masst_projects::Error::is_cancelled)
            || matches!(
                cause.downcast_ref::<masst_providers::Error>(),
                Some(masst_providers::Error::Core(e)) if e.is_cancelled()
            )
    })
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
