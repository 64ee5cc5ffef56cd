//! Fly.io deployments through flyctl

use crate::target::PlatformTarget;
use crate::traits::{DeployContext, DeployReport, Platform, Prerequisite};
use crate::utils::run_single_action;
use async_trait::async_trait;
use masst_core::Invocation;

pub struct FlyPlatform;

impl FlyPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlyPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for FlyPlatform {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::Fly
    }

    fn prerequisites(&self) -> Vec<Prerequisite> {
        vec![Prerequisite {
            name: "Fly CLI",
            program: "fly",
            probe_args: &["version"],
            install_hint: "Install it from: https://fly.io/docs/hands-on/install-flyctl/",
        }]
    }

    async fn deploy(&self, cx: &DeployContext<'_>) -> DeployReport {
        run_single_action(self.target(), cx, Invocation::new("fly").arg("deploy")).await
    }
}
