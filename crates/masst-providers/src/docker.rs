//! Container image builds

use crate::target::PlatformTarget;
use crate::traits::{DeployContext, DeployReport, Platform};
use async_trait::async_trait;
use masst_core::{Invocation, OutputMode, StepOutcome};
use tracing::info;

/// Generated services with a container build context, in build order
const SERVICES: [(&str, &str); 2] = [("web", "./apps/web"), ("api", "./apps/api")];

/// Builds one image per generated service
pub struct ContainerImages;

impl ContainerImages {
    pub fn new() -> Self {
        Self
    }

    /// `<project>-<service>:<tag>` for every service
    pub fn image_names(project: &str, tag: &str) -> Vec<String> {
        SERVICES
            .iter()
            .map(|(service, _)| format!("{}-{}:{}", project, service, tag))
            .collect()
    }
}

impl Default for ContainerImages {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for ContainerImages {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::Docker
    }

    async fn deploy(&self, cx: &DeployContext<'_>) -> DeployReport {
        let project = cx.workspace.project_name();
        let images = Self::image_names(&project, cx.tag);

        for (image, (_, context)) in images.iter().zip(SERVICES) {
            info!("Building {}", image);
            let invocation = cx.workspace.at_root(
                Invocation::new(cx.build_program).args(["build", "-t", image.as_str(), context]),
            );
            let failure = match cx.runner.run(&invocation, OutputMode::Inherit).await {
                Ok(output) if output.success => None,
                Ok(output) => Some(format!(
                    "Building {} failed ({})",
                    image,
                    output.status_description()
                )),
                Err(e) => Some(e.to_string()),
            };
            if let Some(message) = failure {
                return DeployReport::fatal(self.target(), message);
            }
        }

        DeployReport {
            outcome: StepOutcome::Success,
            next_steps: images
                .iter()
                .map(|image| format!("{} push {}", cx.build_program, image))
                .collect(),
            images,
            ..DeployReport::success(self.target())
        }
    }
}
