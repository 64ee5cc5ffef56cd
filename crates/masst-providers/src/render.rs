//! Render deploys from the connected git repository
//!
//! There is no CLI action; pushing to the repository triggers the deploy. The
//! only side effect offered is opening the dashboard after confirmation.

use crate::target::PlatformTarget;
use crate::traits::{DeployContext, DeployReport, Platform, Prerequisite};
use async_trait::async_trait;
use tracing::warn;

pub const DASHBOARD_URL: &str = "https://dashboard.render.com";

pub struct RenderPlatform;

impl RenderPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RenderPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for RenderPlatform {
    fn target(&self) -> PlatformTarget {
        PlatformTarget::Render
    }

    fn prerequisites(&self) -> Vec<Prerequisite> {
        vec![Prerequisite {
            name: "git",
            program: "git",
            probe_args: &["--version"],
            install_hint: "Install it from: https://git-scm.com/downloads",
        }]
    }

    async fn deploy(&self, cx: &DeployContext<'_>) -> DeployReport {
        let mut report = DeployReport::success(self.target());
        report.notes = vec![
            "Render deploys automatically from your GitHub repo.".to_string(),
            "Make sure you have connected your repo at https://render.com".to_string(),
        ];

        if !cx.prompter.is_interactive() {
            return report;
        }

        match cx.prompter.confirm("Open Render dashboard in browser?", true) {
            Ok(true) => {
                if let Err(e) = cx.prompter.open_url(DASHBOARD_URL) {
                    warn!("Could not open browser: {}", e);
                    report.next_steps.push(format!("Open {}", DASHBOARD_URL));
                }
            }
            Ok(false) => {}
            Err(e) if e.is_cancelled() => {}
            Err(e) => report.outcome = masst_core::StepOutcome::fatal(e.to_string()),
        }
        report
    }
}
