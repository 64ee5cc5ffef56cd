//! Shared helpers for platform implementations

use crate::target::PlatformTarget;
use crate::traits::{DeployContext, DeployReport};
use masst_core::{Invocation, OutputMode};
use tracing::debug;

/// Run one deploy command at the project root and report from its exit status
pub(crate) async fn run_single_action(
    target: PlatformTarget,
    cx: &DeployContext<'_>,
    invocation: Invocation,
) -> DeployReport {
    let invocation = cx.workspace.at_root(invocation);
    debug!("Deploying to {} with `{}`", target.display_name(), invocation);
    match cx.runner.run(&invocation, OutputMode::Inherit).await {
        Ok(output) if output.success => DeployReport::success(target),
        Ok(output) => DeployReport::fatal(
            target,
            format!(
                "{} deployment failed ({})",
                target.display_name(),
                output.status_description()
            ),
        ),
        Err(e) => DeployReport::fatal(target, e.to_string()),
    }
}
