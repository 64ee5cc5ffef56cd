//! Deployment target identifiers

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// One independent deployment procedure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlatformTarget {
    /// Build container images locally
    #[default]
    Docker,
    /// Railway CLI deploy
    Railway,
    /// Render, deployed from the connected git repository
    Render,
    /// Fly.io CLI deploy
    Fly,
}

impl PlatformTarget {
    pub const ALL: [PlatformTarget; 4] = [
        PlatformTarget::Docker,
        PlatformTarget::Railway,
        PlatformTarget::Render,
        PlatformTarget::Fly,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PlatformTarget::Docker => "docker",
            PlatformTarget::Railway => "railway",
            PlatformTarget::Render => "render",
            PlatformTarget::Fly => "fly",
        }
    }

    /// Human-readable platform name
    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformTarget::Docker => "Docker",
            PlatformTarget::Railway => "Railway",
            PlatformTarget::Render => "Render",
            PlatformTarget::Fly => "Fly.io",
        }
    }

    /// Comma-separated list of every identifier, for error messages
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(PlatformTarget::id)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PlatformTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.id() == s)
            .ok_or_else(|| Error::UnknownTarget {
                target: s.to_string(),
                supported: Self::supported(),
            })
    }
}
