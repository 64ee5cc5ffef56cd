//! Package manager detection and command syntax

use crate::error::Error;
use crate::process::Invocation;
use camino::Utf8Path;
use std::fmt;
use std::str::FromStr;

/// One of the three recognized JavaScript package managers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackageManager {
    #[default]
    Pnpm,
    Yarn,
    Npm,
}

/// Lockfiles in detection priority order
const LOCKFILES: [(&str, PackageManager); 3] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Detect from lockfiles in `dir`, defaulting to pnpm. Never fails.
    pub fn detect(dir: &Utf8Path) -> Self {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| dir.join(lockfile).is_file())
            .map(|(_, pm)| *pm)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// `<pm> install`
    pub fn install(&self) -> Invocation {
        Invocation::new(self.as_str()).arg("install")
    }

    /// Run a package.json script, forwarding `extra` arguments to it
    pub fn script(&self, name: &str, extra: &[&str]) -> Invocation {
        match self {
            PackageManager::Npm => {
                let inv = Invocation::new("npm").args(["run", name]);
                if extra.is_empty() {
                    inv
                } else {
                    inv.arg("--").args(extra.iter().copied())
                }
            }
            _ => Invocation::new(self.as_str()).arg(name).args(extra.iter().copied()),
        }
    }

    /// Add packages to the project in the current directory
    pub fn add<S: AsRef<str>>(&self, packages: &[S]) -> Invocation {
        let verb = match self {
            PackageManager::Npm => "install",
            _ => "add",
        };
        Invocation::new(self.as_str())
            .arg(verb)
            .args(packages.iter().map(|p| p.as_ref()))
    }

    /// Add packages to one workspace member, e.g. `apps/web`
    pub fn add_to_workspace<S: AsRef<str>>(&self, member: &str, packages: &[S]) -> Invocation {
        let packages = packages.iter().map(|p| p.as_ref());
        match self {
            PackageManager::Pnpm => Invocation::new("pnpm")
                .arg("add")
                .args(packages)
                .args(["--filter", format!("./{}", member).as_str()]),
            PackageManager::Yarn => Invocation::new("yarn")
                .args(["--cwd", member, "add"])
                .args(packages),
            PackageManager::Npm => Invocation::new("npm")
                .arg("install")
                .args(packages)
                .args(["--workspace", member]),
        }
    }

    /// Run a binary installed in one workspace member
    pub fn exec_in(&self, member: &str, program: &str, args: &[&str]) -> Invocation {
        let args = args.iter().copied();
        match self {
            PackageManager::Pnpm => Invocation::new("pnpm")
                .args(["--filter", format!("./{}", member).as_str(), "exec", program])
                .args(args),
            PackageManager::Yarn => Invocation::new("yarn")
                .args(["--cwd", member, program])
                .args(args),
            PackageManager::Npm => Invocation::new("npm")
                .args(["exec", "--workspace", member, "--", program])
                .args(args),
        }
    }

    /// Batch upgrade of `packages` to their latest versions
    pub fn upgrade_latest<S: AsRef<str>>(&self, packages: &[S]) -> Invocation {
        let packages = packages.iter().map(|p| p.as_ref());
        match self {
            PackageManager::Pnpm => Invocation::new("pnpm")
                .arg("update")
                .args(packages)
                .arg("--latest"),
            PackageManager::Yarn => Invocation::new("yarn")
                .arg("upgrade")
                .args(packages)
                .arg("--latest"),
            PackageManager::Npm => Invocation::new("npm").arg("update").args(packages),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "npm" => Ok(PackageManager::Npm),
            other => Err(Error::InvalidPackageManager {
                name: other.to_string(),
            }),
        }
    }
}
