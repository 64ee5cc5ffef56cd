//! Deployment platform dispatch for masst projects
//!
//! Each target is an independent procedure:
//!
//! - Docker (build one image per generated service)
//! - Railway (`railway up`)
//! - Render (deploys from the connected repository)
//! - Fly.io (`fly deploy`)

pub mod docker;
pub mod error;
pub mod fly;
pub mod railway;
pub mod render;
pub mod target;
pub mod traits;
mod utils;

pub use error::{Error, Result};
pub use target::PlatformTarget;
pub use traits::{DeployContext, DeployReport, Platform, Prerequisite, PrerequisiteStatus};

use tracing::debug;

/// Create the procedure for a target
pub fn create_platform(target: PlatformTarget) -> Box<dyn Platform> {
    match target {
        PlatformTarget::Docker => Box::new(docker::ContainerImages::new()),
        PlatformTarget::Railway => Box::new(railway::RailwayPlatform::new()),
        PlatformTarget::Render => Box::new(render::RenderPlatform::new()),
        PlatformTarget::Fly => Box::new(fly::FlyPlatform::new()),
    }
}

/// Validate `target`, check preconditions, then run the matching procedure.
///
/// Unknown targets and a missing project root are rejected before any
/// external invocation. A missing platform CLI is reported with its install
/// hint before the deploy action runs.
pub async fn dispatch(target: &str, cx: &DeployContext<'_>) -> Result<DeployReport> {
    let target: PlatformTarget = target.parse()?;
    cx.workspace.require_project_root()?;

    let platform = create_platform(target);
    let status = platform.check_prerequisites(cx.runner).await;
    if let Some(missing) = status.missing.first() {
        return Err(masst_core::Error::missing_tool(missing.name, missing.install_hint).into());
    }

    debug!("Dispatching deploy to {}", target);
    Ok(platform.deploy(cx).await)
}
