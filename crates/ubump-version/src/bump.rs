use std::fmt;

use semver::{BuildMetadata, Prerelease, Version};
use ubump_core::BumpType;

use crate::Result;
use crate::error::VersionError;
use crate::parse::parse_version;

/// Identifier used for prerelease bumps when neither the caller nor the
/// current version provides one.
pub const DEFAULT_PREID: &str = "prerelease";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Identifier {
    Numeric(u64),
    Alphanumeric(String),
}

impl Identifier {
    // `01` stays alphanumeric so that semver rejects it later.
    fn parse(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(n) if raw == "0" || !raw.starts_with('0') => Self::Numeric(n),
            _ => Self::Alphanumeric(raw.to_string()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Alphanumeric(s) => f.write_str(s),
        }
    }
}

struct Working {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Vec<Identifier>,
}

impl Working {
    fn from_version(version: &Version) -> Self {
        let pre = if version.pre.is_empty() {
            Vec::new()
        } else {
            version.pre.as_str().split('.').map(Identifier::parse).collect()
        };

        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre,
        }
    }

    // A prerelease of x.0.0 graduates to x.0.0 instead of moving on.
    fn inc_major(&mut self) {
        if self.minor != 0 || self.patch != 0 || self.pre.is_empty() {
            self.major += 1;
        }
        self.minor = 0;
        self.patch = 0;
        self.pre.clear();
    }

    fn inc_minor(&mut self) {
        if self.patch != 0 || self.pre.is_empty() {
            self.minor += 1;
        }
        self.patch = 0;
        self.pre.clear();
    }

    fn inc_patch(&mut self) {
        if self.pre.is_empty() {
            self.patch += 1;
        }
        self.pre.clear();
    }

    /// Without `preid` only the counter moves.
    fn inc_pre(&mut self, preid: Option<&str>) {
        if self.pre.is_empty() {
            self.pre.push(Identifier::Numeric(0));
        } else if let Some(Identifier::Numeric(n)) = self
            .pre
            .iter_mut()
            .rev()
            .find(|id| matches!(id, Identifier::Numeric(_)))
        {
            *n += 1;
        } else {
            self.pre.push(Identifier::Numeric(0));
        }

        let Some(preid) = preid else {
            return;
        };

        let same_identifier = self.pre.first().is_some_and(|id| id.to_string() == preid);
        let has_counter = matches!(self.pre.get(1), Some(Identifier::Numeric(_)));

        if !same_identifier || !has_counter {
            self.pre = vec![Identifier::parse(preid), Identifier::Numeric(0)];
        }
    }

    fn into_version(self, preid: &str) -> Result<Version> {
        let pre = if self.pre.is_empty() {
            Prerelease::EMPTY
        } else {
            let joined = self
                .pre
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".");
            Prerelease::new(&joined).map_err(|_| VersionError::InvalidPrereleaseIdentifier {
                identifier: preid.to_string(),
            })?
        };

        Ok(Version {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre,
            build: BuildMetadata::EMPTY,
        })
    }
}

/// First dot-separated component of the version's prerelease, unless the
/// prerelease starts with a bare counter (`1.0.0-3`).
#[must_use]
pub fn prerelease_identifier(version: &Version) -> Option<&str> {
    if version.pre.is_empty() {
        return None;
    }
    version
        .pre
        .as_str()
        .split('.')
        .next()
        .filter(|id| !matches!(Identifier::parse(id), Identifier::Numeric(_)))
}

/// The identifier a prerelease bump uses when none is given explicitly.
#[must_use]
pub fn default_preid(version: &Version) -> &str {
    prerelease_identifier(version).unwrap_or(DEFAULT_PREID)
}

// `None` means the version carries a bare numeric prerelease and no other
// identifier was asked for.
fn resolve_preid<'a>(version: &'a Version, preid: Option<&'a str>) -> Option<&'a str> {
    match preid.map(str::trim) {
        Some(id) if !id.is_empty() && id != DEFAULT_PREID => Some(id),
        _ if version.pre.is_empty() => Some(DEFAULT_PREID),
        _ => prerelease_identifier(version),
    }
}

/// # Errors
///
/// Returns [`VersionError::InvalidPrereleaseIdentifier`] if `preid` cannot
/// appear in a semver prerelease.
pub fn bump_version(version: &Version, bump_type: BumpType, preid: Option<&str>) -> Result<Version> {
    let mut working = Working::from_version(version);

    if !bump_type.is_pre() {
        match bump_type {
            BumpType::Major => working.inc_major(),
            BumpType::Minor => working.inc_minor(),
            _ => working.inc_patch(),
        }
        return working.into_version("");
    }

    let preid = resolve_preid(version, preid);

    match bump_type {
        BumpType::Premajor => {
            working.pre.clear();
            working.inc_major();
        }
        BumpType::Preminor => {
            working.pre.clear();
            working.inc_minor();
        }
        BumpType::Prepatch => {
            working.pre.clear();
            working.inc_patch();
        }
        _ => {
            if working.pre.is_empty() {
                working.inc_patch();
            }
        }
    }
    working.inc_pre(preid);

    working.into_version(preid.unwrap_or_default())
}

/// String-level entry point: the version is validated before the bump type.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] or [`VersionError::InvalidBumpType`].
pub fn bump_version_str(version: &str, bump_type: &str, preid: Option<&str>) -> Result<Version> {
    let version = parse_version(version)?;
    let bump_type: BumpType = bump_type.parse()?;
    bump_version(&version, bump_type, preid)
}
