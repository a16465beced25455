use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

static EMBEDDED_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d+\.\d+\.\d+(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?",
    )
    .expect("embedded version pattern is valid")
});

/// Locates the last semver version inside a dependency range such as
/// `^1.2.3` or `>=1.0.0 <2.0.0`.
#[must_use]
pub fn find_embedded_version(range: &str) -> Option<(Range<usize>, Version)> {
    EMBEDDED_VERSION
        .find_iter(range)
        .filter_map(|m| Version::parse(m.as_str()).ok().map(|v| (m.range(), v)))
        .last()
}

/// Replaces the last embedded version in `range` with `version`, keeping the
/// operator and any surrounding text.
///
/// Returns `None` when the range holds no version or already names `version`.
#[must_use]
pub fn rewrite_embedded_version(range: &str, version: &Version) -> Option<String> {
    let (span, current) = find_embedded_version(range)?;
    if current == *version {
        return None;
    }

    let mut rewritten = String::with_capacity(range.len());
    rewritten.push_str(&range[..span.start]);
    rewritten.push_str(&version.to_string());
    rewritten.push_str(&range[span.end..]);
    Some(rewritten)
}
