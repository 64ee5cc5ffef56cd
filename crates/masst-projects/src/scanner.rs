//! Workspace dependency scanning for `upgrade`
//!
//! Reads the root `package.json` plus every `package.json` exactly one level
//! below each workspace root, and collects dependency names carrying the
//! reserved namespace prefix. Unreadable or malformed manifests contribute
//! nothing.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Unique dependency names, iterated in sorted order
pub type DependencySet = BTreeSet<String>;

const MANIFEST: &str = "package.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, Value>,
}

/// Collects namespaced dependencies across a workspace
#[derive(Debug, Clone)]
pub struct DependencyScanner {
    namespace: String,
    roots: Vec<String>,
}

impl DependencyScanner {
    pub fn new(namespace: impl Into<String>, roots: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            roots,
        }
    }

    /// Manifests that exist, root first, then each workspace root in order
    pub fn manifests(&self, workspace_root: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut manifests = Vec::new();

        let root_manifest = workspace_root.join(MANIFEST);
        if root_manifest.is_file() {
            manifests.push(root_manifest);
        }

        for root in &self.roots {
            let dir = workspace_root.join(root);
            if !dir.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_dir())
            {
                let Ok(member) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                    continue;
                };
                let manifest = member.join(MANIFEST);
                if manifest.is_file() {
                    manifests.push(manifest);
                }
            }
        }

        manifests
    }

    /// Namespaced dependencies declared by one manifest
    pub fn scan_manifest(&self, path: &Utf8Path) -> DependencySet {
        let parsed = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<Manifest>(&content).ok());
        let Some(manifest) = parsed else {
            debug!(%path, "skipping unreadable manifest");
            return DependencySet::new();
        };

        manifest
            .dependencies
            .into_keys()
            .chain(manifest.dev_dependencies.into_keys())
            .filter(|name| name.starts_with(&self.namespace))
            .collect()
    }

    pub fn scan(&self, workspace_root: &Utf8Path) -> DependencySet {
        self.manifests(workspace_root)
            .iter()
            .flat_map(|manifest| self.scan_manifest(manifest))
            .collect()
    }
}
