//! Container runtime invocations

use masst_core::types::ContainerConfig;
use masst_core::{Error, Invocation, Result, WorkspaceContext};

/// Builds compose invocations anchored at the workspace root
#[derive(Debug, Clone)]
pub struct Compose {
    base: Invocation,
    datastore_service: String,
    datastore_user: String,
}

impl Compose {
    pub fn new(config: &ContainerConfig, ctx: &WorkspaceContext) -> Result<Self> {
        let base = Invocation::from_command(&config.compose_command)
            .ok_or_else(|| Error::invalid_config("containers.compose-command must not be empty"))?;
        Ok(Self {
            base: ctx.at_root(base),
            datastore_service: config.datastore_service.clone(),
            datastore_user: config.datastore_user.clone(),
        })
    }

    /// `up -d`
    pub fn up(&self) -> Invocation {
        self.base.clone().args(["up", "-d"])
    }

    pub fn down(&self) -> Invocation {
        self.base.clone().arg("down")
    }

    /// `exec -T <service> pg_isready -U <user>`
    pub fn readiness_probe(&self) -> Invocation {
        self.base.clone().args([
            "exec",
            "-T",
            self.datastore_service.as_str(),
            "pg_isready",
            "-U",
            self.datastore_user.as_str(),
        ])
    }

    pub fn logs(&self, tail: u32, follow: bool, service: Option<&str>) -> Invocation {
        let mut inv = self.base.clone().arg("logs").arg(format!("--tail={}", tail));
        if follow {
            inv = inv.arg("-f");
        }
        if let Some(service) = service {
            inv = inv.arg(service);
        }
        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masst_core::PackageManager;

    fn ctx() -> WorkspaceContext {
        WorkspaceContext::new("/work/shop", PackageManager::Pnpm, true, true)
    }

    #[test]
    fn test_default_commands() {
        let compose = Compose::new(&ContainerConfig::default(), &ctx()).unwrap();
        assert_eq!(compose.up().to_string(), "docker compose up -d");
        assert_eq!(compose.down().to_string(), "docker compose down");
        assert_eq!(
            compose.readiness_probe().to_string(),
            "docker compose exec -T postgres pg_isready -U postgres"
        );
        assert_eq!(compose.up().cwd().map(|p| p.as_str()), Some("/work/shop"));
    }

    #[test]
    fn test_logs_flags() {
        let config = ContainerConfig {
            compose_command: vec!["docker-compose".into()],
            ..ContainerConfig::default()
        };
        let compose = Compose::new(&config, &ctx()).unwrap();
        assert_eq!(compose.logs(100, false, None).to_string(), "docker-compose logs --tail=100");
        assert_eq!(
            compose.logs(20, true, Some("postgres")).to_string(),
            "docker-compose logs --tail=20 -f postgres"
        );
    }

    #[test]
    fn test_empty_compose_command() {
        let config = ContainerConfig {
            compose_command: vec![],
            ..ContainerConfig::default()
        };
        assert!(Compose::new(&config, &ctx()).is_err());
    }
}
