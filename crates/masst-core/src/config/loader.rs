//! Layered runtime configuration loader
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Global config (~/.masst/runtime.yaml, or $MASST_CONFIG_DIR/runtime.yaml)
//! 3. Environment variables (MASST_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "runtime-defaults.yaml";
const RUNTIME_FILE: &str = "runtime.yaml";

/// Runtime configuration loader
pub struct RuntimeConfigLoader {
    /// Directory holding the user's runtime.yaml; `None` when no home directory is known
    config_dir: Option<Utf8PathBuf>,
}

impl RuntimeConfigLoader {
    /// Create a loader rooted at the standard config directory
    pub fn new() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
        }
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_dir: Some(config_dir.into()),
        }
    }

    /// `$MASST_CONFIG_DIR`, else `~/.masst`
    fn default_config_dir() -> Option<Utf8PathBuf> {
        if let Ok(dir) = env::var("MASST_CONFIG_DIR") {
            return Some(Utf8PathBuf::from(dir));
        }
        dirs::home_dir()
            .and_then(|home| Utf8PathBuf::from_path_buf(home).ok())
            .map(|home| home.join(".masst"))
    }

    /// Load runtime configuration with layered precedence
    pub fn load(&self) -> Result<RuntimeConfig> {
        let mut merged = Self::load_embedded_value(DEFAULTS_FILE)?;

        if let Some(dir) = &self.config_dir {
            let path = dir.join(RUNTIME_FILE);
            if path.exists() {
                debug!("Loading runtime config from {}", path);
                let overlay = Self::load_yaml_value(&path)?;
                merge_values(&mut merged, overlay);
            }
        }

        let config: RuntimeConfig = serde_yaml_ng::from_value(merged)
            .map_err(|e| Error::invalid_config(format!("Failed to parse runtime config: {}", e)))?;

        validate(apply_env_overrides(config)?)
    }

    fn load_embedded_value(filename: &str) -> Result<Value> {
        let file = EmbeddedConfigs::get(filename).ok_or_else(|| Error::EmbeddedConfigNotFound {
            name: filename.to_string(),
        })?;
        let content = std::str::from_utf8(&file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;
        Ok(serde_yaml_ng::from_str(content)?)
    }

    fn load_yaml_value(path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }
}

impl Default for RuntimeConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, everything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// The readiness wait must probe at least once
fn validate(config: RuntimeConfig) -> Result<RuntimeConfig> {
    if config.readiness.max_attempts == 0 {
        return Err(Error::invalid_config("readiness.max-attempts must be at least 1"));
    }
    Ok(config)
}

fn apply_env_overrides(mut config: RuntimeConfig) -> Result<RuntimeConfig> {
    if let Ok(val) = env::var("MASST_READINESS_MAX_ATTEMPTS") {
        config.readiness.max_attempts = val.parse().map_err(|_| {
            Error::invalid_config("MASST_READINESS_MAX_ATTEMPTS must be a valid number")
        })?;
    }

    if let Ok(val) = env::var("MASST_READINESS_DELAY_MS") {
        let delay: u64 = val.parse().map_err(|_| {
            Error::invalid_config("MASST_READINESS_DELAY_MS must be a valid number")
        })?;
        config.readiness.initial_delay_ms = delay;
        config.readiness.max_delay_ms = config.readiness.max_delay_ms.max(delay);
    }

    if let Ok(val) = env::var("MASST_COMPOSE_COMMAND") {
        let command: Vec<String> = val.split_whitespace().map(str::to_string).collect();
        if command.is_empty() {
            return Err(Error::invalid_config("MASST_COMPOSE_COMMAND must not be empty"));
        }
        config.containers.compose_command = command;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var("MASST_READINESS_MAX_ATTEMPTS");
        env::remove_var("MASST_READINESS_DELAY_MS");
        env::remove_var("MASST_COMPOSE_COMMAND");
    }

    fn loader_in(dir: &TempDir) -> RuntimeConfigLoader {
        RuntimeConfigLoader::with_dir(Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap())
    }

    #[test]
    #[serial]
    fn test_embedded_defaults_match_builtin_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let config = loader_in(&dir).load().unwrap();
        let builtin = RuntimeConfig::default();

        assert_eq!(config.readiness, builtin.readiness);
        assert_eq!(config.containers.compose_command, builtin.containers.compose_command);
        assert_eq!(config.workspace.namespace, builtin.workspace.namespace);
        assert_eq!(config.handoff.endpoints, builtin.handoff.endpoints);
    }

    #[test]
    #[serial]
    fn test_file_overlay_merges_nested_keys() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("runtime.yaml"),
            "readiness:\n  max-attempts: 3\ncontainers:\n  compose-command: [docker-compose]\n",
        )
        .unwrap();

        let config = loader_in(&dir).load().unwrap();
        assert_eq!(config.readiness.max_attempts, 3);
        // untouched sibling keys keep the embedded values
        assert_eq!(config.readiness.initial_delay_ms, 1000);
        assert_eq!(config.containers.compose_command, vec!["docker-compose"]);
        assert_eq!(config.containers.datastore_service, "postgres");
    }

    #[test]
    #[serial]
    fn test_env_overrides_win() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("MASST_READINESS_MAX_ATTEMPTS", "2");
        env::set_var("MASST_READINESS_DELAY_MS", "50");
        env::set_var("MASST_COMPOSE_COMMAND", "podman compose");

        let config = loader_in(&dir).load().unwrap();
        clear_env();

        assert_eq!(config.readiness.max_attempts, 2);
        assert_eq!(config.readiness.initial_delay_ms, 50);
        assert_eq!(config.containers.compose_command, vec!["podman", "compose"]);
    }

    #[test]
    #[serial]
    fn test_invalid_env_override_is_config_error() {
        clear_env();
        let dir = TempDir::new().unwrap();
        env::set_var("MASST_READINESS_MAX_ATTEMPTS", "lots");

        let result = loader_in(&dir).load();
        clear_env();

        let err = result.unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::Config);
        assert!(err.to_string().contains("MASST_READINESS_MAX_ATTEMPTS"));
    }

    #[test]
    #[serial]
    fn test_zero_readiness_attempts_rejected() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("runtime.yaml"), "readiness:\n  max-attempts: 0\n").unwrap();

        let err = loader_in(&dir).load().unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::Config);
        assert!(err.to_string().contains("max-attempts"));

        fs::remove_file(dir.path().join("runtime.yaml")).unwrap();
        env::set_var("MASST_READINESS_MAX_ATTEMPTS", "0");
        let result = loader_in(&dir).load();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_reported() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("runtime.yaml"), "readiness: [unclosed").unwrap();

        let err = loader_in(&dir).load().unwrap_err();
        assert!(err.to_string().contains("runtime.yaml"));
    }
}
