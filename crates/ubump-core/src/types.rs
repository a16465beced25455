use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use semver::Version;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpType {
    Patch,
    Minor,
    Major,
    Prepatch,
    Preminor,
    Premajor,
    Prerelease,
}

impl BumpType {
    pub const ALL: [Self; 7] = [
        Self::Patch,
        Self::Minor,
        Self::Major,
        Self::Prepatch,
        Self::Preminor,
        Self::Premajor,
        Self::Prerelease,
    ];

    /// `true` for the four variants that produce a prerelease version.
    #[must_use]
    pub fn is_pre(self) -> bool {
        matches!(
            self,
            Self::Prepatch | Self::Preminor | Self::Premajor | Self::Prerelease
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Prepatch => "prepatch",
            Self::Preminor => "preminor",
            Self::Premajor => "premajor",
            Self::Prerelease => "prerelease",
        }
    }

    /// Capitalized name used when offering the bump type in prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Patch => "Patch",
            Self::Minor => "Minor",
            Self::Major => "Major",
            Self::Prepatch => "Prepatch",
            Self::Preminor => "Preminor",
            Self::Premajor => "Premajor",
            Self::Prerelease => "Prerelease",
        }
    }

    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|b| b.as_str()).collect()
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == canonical)
            .ok_or_else(|| CoreError::InvalidBumpType {
                input: s.to_string(),
            })
    }
}

/// A confirmed package bump, kept for the commit message and subtree splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpResult {
    pub display_name: String,
    pub unfriendly_name: String,
    pub version: Version,
    pub directory: PathBuf,
}
