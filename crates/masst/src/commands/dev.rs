//! Dev command

use anyhow::Result;
use masst_core::types::HandoffConfig;
use masst_core::StepOutcome;
use masst_environment::{
    Abort, DevOptions, HandoffExit, OrchestrationSession, Orchestrator, Reporter, SeedOutcome,
    StepDetail, StepEnv, StepKind, StepReport,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

use crate::app::App;
use crate::cli::DevArgs;
use crate::output;

pub async fn run(args: DevArgs, app: &App) -> Result<ExitCode> {
    app.workspace.require_project_root()?;
    app.handle_interrupts();

    output::header("Starting development environment");

    let session = OrchestrationSession::new(
        &app.workspace,
        DevOptions {
            no_containers: args.no_containers,
            seed: args.seed,
            reset: args.reset,
        },
    );
    if !session.has_container_manifest {
        output::info(&format!(
            "No {} found, using external database",
            app.config.workspace.container_manifest
        ));
    } else if !session.use_containers {
        output::info("Skipping containers, using external database");
    }

    let env = StepEnv {
        ctx: app.workspace.clone(),
        config: app.config.clone(),
        session,
        runner: Arc::clone(&app.runner),
        shutdown: app.shutdown.clone(),
        reporter: Arc::new(TerminalReporter),
    };
    let report = Orchestrator::new(env).run().await;

    match &report.abort {
        Some(Abort::Fatal { step, message }) => {
            output::error(message);
            if *step == StepKind::ContainerUp {
                output::hint("Make sure Docker is running and try again");
                output::hint("Or use --no-containers to use an external database");
            }
        }
        Some(Abort::Interrupted { step }) => {
            output::warning(&format!("Interrupted while {}", step.label().to_lowercase()));
        }
        None => {
            if report.detail(StepKind::Handoff) == Some(StepDetail::Handoff(HandoffExit::Interrupted))
            {
                println!();
                output::info("Dev servers stopped");
            }
        }
    }

    let code = report.exit_code();
    debug!(code, "dev session finished");
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Prints step progress and the handoff summary
struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn step_started(&self, kind: StepKind) {
        if kind != StepKind::Preflight && kind != StepKind::Handoff {
            output::hint(&format!("{}...", kind.label()));
        }
    }

    fn step_finished(&self, kind: StepKind, report: &StepReport) {
        match &report.outcome {
            StepOutcome::Success => {
                if let Some(message) = success_message(kind, report.detail) {
                    output::success(&message);
                }
            }
            StepOutcome::Warning(message) => {
                let message = match kind {
                    StepKind::Readiness => {
                        "Database may not be ready yet, continuing anyway...".to_string()
                    }
                    _ => format!("{}: {}", kind.label(), message),
                };
                output::warning(&message);
            }
            // Reported once the session ends
            StepOutcome::Fatal(_) => {}
        }
    }

    fn readiness_attempt(&self, attempt: u32, max_attempts: u32) {
        debug!(attempt, max_attempts, "readiness probe");
    }

    fn handoff(&self, summary: &HandoffConfig) {
        output::header("Your app is starting");
        for endpoint in &summary.endpoints {
            output::kv(&endpoint.label, &endpoint.url);
        }
        output::kv(
            "Demo login",
            &format!("{} / {}", summary.demo_email, summary.demo_password),
        );
        println!();
        output::hint("Press Ctrl+C to stop");
        println!();
    }
}

fn success_message(kind: StepKind, detail: Option<StepDetail>) -> Option<String> {
    let message = match (kind, detail) {
        (StepKind::Preflight, _) | (StepKind::Handoff, _) => return None,
        (StepKind::ContainerUp, _) => "Containers started".to_string(),
        (StepKind::Readiness, Some(StepDetail::Readiness { attempts })) if attempts > 1 => {
            format!("Database is ready (after {} attempts)", attempts)
        }
        (StepKind::Readiness, _) => "Database is ready".to_string(),
        (StepKind::Generate, _) => "Database client generated".to_string(),
        (StepKind::ApplySchema, Some(StepDetail::Schema { fell_back: true })) => {
            "Database schema pushed (reset was not available)".to_string()
        }
        (StepKind::ApplySchema, _) => "Database schema in sync".to_string(),
        (StepKind::Seed, Some(StepDetail::Seed(SeedOutcome::AlreadySeeded))) => {
            "Database already has data, skipping seed".to_string()
        }
        (StepKind::Seed, Some(StepDetail::Seed(SeedOutcome::FreshlySeeded))) => {
            "Demo data seeded".to_string()
        }
        (StepKind::Seed, _) => "Seed finished".to_string(),
    };
    Some(message)
}
