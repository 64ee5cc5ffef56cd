//! Railway deployments through the Railway CLI

use crate::target::PlatformTarget;
use crate::traits::{DeployContext, DeployReport, Platform, Prerequisite};
use crate::utils::run_single_action;
use async_trait::async_trait;
use masst_core::Invocation;

pub struct RailwayPlatform;

impl RailwayPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RailwayPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for RailwayPlatform {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::Railway
    }

    fn prerequisites(&self) -> Vec<Prerequisite> {
        vec![Prerequisite {
            name: "Railway CLI",
            program: "railway",
            probe_args: &["--version"],
            install_hint: "Install it with: npm install -g @railway/cli, then run: railway login",
        }]
    }

    async fn deploy(&self, cx: &DeployContext<'_>) -> DeployReport {
        run_single_action(self.target(), cx, Invocation::new("railway").arg("up")).await
    }
}
