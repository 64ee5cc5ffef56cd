//! Explicit description of the project a command operates on

use crate::error::{Error, Result};
use crate::package_manager::PackageManager;
use crate::process::Invocation;
use crate::types::WorkspaceLayout;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Fallback when the root manifest has no usable `name`
pub const DEFAULT_PROJECT_NAME: &str = "masst-app";

/// Everything a command needs to know about its project directory.
///
/// Built once in the CLI from the selected directory and passed down, so no
/// component reads the process working directory itself.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    root: Utf8PathBuf,
    package_manager: PackageManager,
    is_project_root: bool,
    has_container_manifest: bool,
    layout: WorkspaceLayout,
}

#[derive(Deserialize)]
struct RootManifest {
    name: Option<String>,
}

impl WorkspaceContext {
    /// Inspect `root` for the workspace marker, container manifest and lockfiles
    pub fn inspect(root: impl Into<Utf8PathBuf>, layout: &WorkspaceLayout) -> Self {
        let root = root.into();
        Self {
            package_manager: PackageManager::detect(&root),
            is_project_root: root.join(&layout.marker).is_file(),
            has_container_manifest: root.join(&layout.container_manifest).is_file(),
            layout: layout.clone(),
            root,
        }
    }

    /// Construct without touching the filesystem
    pub fn new(
        root: impl Into<Utf8PathBuf>,
        package_manager: PackageManager,
        is_project_root: bool,
        has_container_manifest: bool,
    ) -> Self {
        Self {
            root: root.into(),
            package_manager,
            is_project_root,
            has_container_manifest,
            layout: WorkspaceLayout::default(),
        }
    }

    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = package_manager;
        self
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn is_project_root(&self) -> bool {
        self.is_project_root
    }

    pub fn has_container_manifest(&self) -> bool {
        self.has_container_manifest
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Fails unless the workspace marker is present
    pub fn require_project_root(&self) -> Result<()> {
        if self.is_project_root {
            Ok(())
        } else {
            Err(Error::not_project_root(&self.layout.marker))
        }
    }

    /// Fails unless the container manifest is present
    pub fn require_container_manifest(&self) -> Result<()> {
        if self.has_container_manifest {
            Ok(())
        } else {
            Err(Error::no_container_manifest(&self.layout.container_manifest))
        }
    }

    /// `name` from the root package.json, or [`DEFAULT_PROJECT_NAME`]
    pub fn project_name(&self) -> String {
        fs::read_to_string(self.path("package.json"))
            .ok()
            .and_then(|content| serde_json::from_str::<RootManifest>(&content).ok())
            .and_then(|manifest| manifest.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
    }

    /// Anchor an invocation at the workspace root
    pub fn at_root(&self, invocation: Invocation) -> Invocation {
        invocation.current_dir(self.root.clone())
    }

    /// A package.json script run with the resolved package manager
    pub fn script(&self, name: &str, extra: &[&str]) -> Invocation {
        self.at_root(self.package_manager.script(name, extra))
    }
}
