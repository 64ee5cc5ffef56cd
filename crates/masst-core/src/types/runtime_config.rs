//! Runtime configuration types for operational parameters
//!
//! These types control how masst talks to the container runtime, how long it
//! waits for the datastore, how it classifies seed output, and what it prints
//! at dev-server handoff.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Container runtime invocation
    #[serde(default)]
    pub containers: ContainerConfig,

    /// Datastore readiness polling
    #[serde(default = "default_readiness_policy")]
    pub readiness: RetryPolicy,

    /// Project layout conventions
    #[serde(default)]
    pub workspace: WorkspaceLayout,

    /// Seed output classification
    #[serde(default)]
    pub seed: SeedMarkers,

    /// Handoff summary and foreground process handling
    #[serde(default)]
    pub handoff: HandoffConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            containers: ContainerConfig::default(),
            readiness: default_readiness_policy(),
            workspace: WorkspaceLayout::default(),
            seed: SeedMarkers::default(),
            handoff: HandoffConfig::default(),
        }
    }
}

/// Container runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContainerConfig {
    /// Compose command, e.g. `["docker", "compose"]` or `["docker-compose"]`
    #[serde(default = "default_compose_command")]
    pub compose_command: Vec<String>,

    /// Image build program
    #[serde(default = "default_build_program")]
    pub build_program: String,

    /// Service name of the primary datastore in the manifest
    #[serde(default = "default_datastore_service")]
    pub datastore_service: String,

    /// Role used by the health probe
    #[serde(default = "default_datastore_user")]
    pub datastore_user: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            compose_command: default_compose_command(),
            build_program: default_build_program(),
            datastore_service: default_datastore_service(),
            datastore_user: default_datastore_user(),
        }
    }
}

fn default_compose_command() -> Vec<String> {
    vec!["docker".to_string(), "compose".to_string()]
}
fn default_build_program() -> String {
    "docker".to_string()
}
fn default_datastore_service() -> String {
    "postgres".to_string()
}
fn default_datastore_user() -> String {
    "postgres".to_string()
}

/// Project layout conventions shared by every environment-sensitive command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkspaceLayout {
    /// File whose presence marks a project root
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Container manifest file name
    #[serde(default = "default_container_manifest")]
    pub container_manifest: String,

    /// Reserved dependency namespace prefix
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Workspace subdirectories holding sub-projects
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            container_manifest: default_container_manifest(),
            namespace: default_namespace(),
            roots: default_roots(),
        }
    }
}

fn default_marker() -> String {
    "turbo.json".to_string()
}
fn default_container_manifest() -> String {
    "docker-compose.yml".to_string()
}
fn default_namespace() -> String {
    "@masst/".to_string()
}
fn default_roots() -> Vec<String> {
    vec!["apps".to_string(), "packages".to_string()]
}

/// Substrings the seed script prints, used for best-effort classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeedMarkers {
    /// Printed when the datastore already holds data
    #[serde(default = "default_existing_marker")]
    pub existing: String,

    /// Printed after demo data was inserted
    #[serde(default = "default_seeded_marker")]
    pub seeded: String,
}

impl Default for SeedMarkers {
    fn default() -> Self {
        Self {
            existing: default_existing_marker(),
            seeded: default_seeded_marker(),
        }
    }
}

fn default_existing_marker() -> String {
    "already has data".to_string()
}
fn default_seeded_marker() -> String {
    "Demo credentials".to_string()
}

/// A reachable service shown in the handoff summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub label: String,
    pub url: String,
}

/// Handoff settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HandoffConfig {
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<Endpoint>,

    #[serde(default = "default_demo_email")]
    pub demo_email: String,

    #[serde(default = "default_demo_password")]
    pub demo_password: String,

    /// How long to wait for the dev servers to exit after an interrupt
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            demo_email: default_demo_email(),
            demo_password: default_demo_password(),
            grace_period_ms: default_grace_period_ms(),
        }
    }
}

fn default_endpoints() -> Vec<Endpoint> {
    [
        ("Web", "http://localhost:3000"),
        ("API", "http://localhost:4000"),
        ("Docs", "http://localhost:4000/api/docs"),
    ]
    .into_iter()
    .map(|(label, url)| Endpoint {
        label: label.to_string(),
        url: url.to_string(),
    })
    .collect()
}
fn default_demo_email() -> String {
    "demo@example.com".to_string()
}
fn default_demo_password() -> String {
    "demo123".to_string()
}
fn default_grace_period_ms() -> u64 {
    5000
}

/// Retry policy for an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay strategy between attempts
    #[serde(default)]
    pub strategy: RetryStrategy,

    /// Backoff multiplier for exponential strategies
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            strategy: RetryStrategy::default(),
            backoff_multiplier: default_backoff_multiplier(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl RetryPolicy {
    /// Fixed-delay policy with the given attempt budget
    pub fn fixed(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            strategy: RetryStrategy::FixedDelay,
            initial_delay_ms: delay_ms,
            max_delay_ms: delay_ms,
            ..Self::default()
        }
    }
}

fn default_readiness_policy() -> RetryPolicy {
    RetryPolicy::fixed(15, 1000)
}
fn default_max_attempts() -> u32 {
    3
}
fn default_backoff_multiplier() -> f64 {
    2.0
}
fn default_initial_delay() -> u64 {
    1000
}
fn default_max_delay() -> u64 {
    30000
}

/// Delay strategy between retry attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryStrategy {
    /// Retry immediately
    None,
    /// Same delay every time
    #[default]
    FixedDelay,
    /// Delay grows by `initial_delay_ms` each attempt
    LinearBackoff,
    /// Delay multiplies by `backoff_multiplier` each attempt
    ExponentialBackoff,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.containers.compose_command, vec!["docker", "compose"]);
        assert_eq!(config.readiness.max_attempts, 15);
        assert_eq!(config.readiness.initial_delay_ms, 1000);
        assert_eq!(config.readiness.strategy, RetryStrategy::FixedDelay);
        assert_eq!(config.workspace.namespace, "@masst/");
        assert_eq!(config.handoff.endpoints.len(), 3);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
readiness:
  max-attempts: 4
seed:
  existing: "nothing to do"
"#;
        let config: RuntimeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.readiness.max_attempts, 4);
        assert_eq!(config.seed.existing, "nothing to do");
        assert_eq!(config.seed.seeded, "Demo credentials");
        assert_eq!(config.workspace.marker, "turbo.json");
    }
}
