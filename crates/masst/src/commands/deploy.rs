//! Deploy command

use anyhow::{bail, Result};
use masst_core::StepOutcome;
use masst_providers::{dispatch, DeployContext, PlatformTarget};

use crate::app::App;
use crate::cli::DeployArgs;
use crate::output;

pub async fn run(args: DeployArgs, app: &App) -> Result<()> {
    let cx = DeployContext {
        workspace: &app.workspace,
        runner: app.runner.as_ref(),
        prompter: app.prompter.as_ref(),
        tag: &args.tag,
        build_program: &app.config.containers.build_program,
    };

    if let Ok(target) = args.target.parse::<PlatformTarget>() {
        output::header(&format!("Deploying to {}", target.display_name()));
    }

    let report = dispatch(&args.target, &cx).await?;

    for note in &report.notes {
        output::info(note);
    }
    if let StepOutcome::Fatal(message) = &report.outcome {
        bail!("{}", message);
    }

    match report.target {
        PlatformTarget::Docker => {
            for image in &report.images {
                output::success(&format!("Built {}", image));
            }
            output::success("Docker images built successfully!");
        }
        PlatformTarget::Railway | PlatformTarget::Fly => {
            output::success(&format!("Deployed to {}!", report.target.display_name()));
        }
        PlatformTarget::Render => {}
    }

    if !report.next_steps.is_empty() {
        println!();
        println!("Next steps:");
        for step in &report.next_steps {
            output::hint(step);
        }
    }
    Ok(())
}
