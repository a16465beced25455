use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::Result;
use crate::error::VersionError;

static COERCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])")
        .expect("coerce pattern is valid")
});

/// Parses a version, tolerating surrounding whitespace and a leading `v`.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] if the remainder is not strict semver.
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);

    Version::parse(bare).map_err(|_| VersionError::InvalidVersion {
        input: input.to_string(),
    })
}

#[must_use]
pub fn is_valid(input: &str) -> bool {
    parse_version(input).is_ok()
}

/// Pulls the first `major[.minor[.patch]]` run of digits out of arbitrary text.
#[must_use]
pub fn coerce(input: &str) -> Option<Version> {
    let captures = COERCE_PATTERN.captures(input)?;
    let component = |i: usize| -> Option<u64> {
        captures
            .get(i)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };

    Some(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Reads a version field as stored in a manifest: values with fewer than three
/// dot-separated components are coerced first (`0.1` becomes `0.1.0`).
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] if the value cannot be read as semver.
pub fn parse_document_version(raw: &str) -> Result<Version> {
    if raw.split('.').count() < 3 {
        return coerce(raw).ok_or_else(|| VersionError::InvalidVersion {
            input: raw.to_string(),
        });
    }

    parse_version(raw)
}
