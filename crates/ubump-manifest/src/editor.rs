use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::Result;
use crate::error::ManifestError;
use crate::paths::{PROJECT_VERSION_FILE, resolve_path};

static EDITOR_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^m_EditorVersion:\s*(\d+)\.(\d+)\.(\d+)([A-Za-z][0-9A-Za-z]*)?\s*$")
        .expect("editor version pattern is valid")
});

/// Unity editor version from `ProjectSettings/ProjectVersion.txt`, such as
/// `2019.3.0f6`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: String,
}

impl EditorVersion {
    /// Parses the first line of the marker file.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.lines().next()?;
        let captures = EDITOR_VERSION.captures(first)?;

        Some(Self {
            major: captures[1].parse().ok()?,
            minor: captures[2].parse().ok()?,
            patch: captures[3].parse().ok()?,
            suffix: captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// Value for a package's `unity` field, e.g. `2019.3`.
    #[must_use]
    pub fn unity(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Value for a package's `unityRelease` field, e.g. `0f6`.
    #[must_use]
    pub fn unity_release(&self) -> String {
        format!("{}{}", self.patch, self.suffix)
    }

    /// Package environment fields this editor version is authoritative for.
    #[must_use]
    pub fn package_fields(&self) -> [(&'static str, String); 2] {
        [("unity", self.unity()), ("unityRelease", self.unity_release())]
    }
}

/// # Errors
///
/// Returns `ManifestError::MissingProjectVersionFile` if the marker file is
/// absent, or `ManifestError::EditorVersionParse` if its first line is not an
/// editor version.
pub fn read_editor_version(path: &Path) -> Result<EditorVersion> {
    let path = resolve_path(path, PROJECT_VERSION_FILE);
    if !path.is_file() {
        return Err(ManifestError::MissingProjectVersionFile { path });
    }

    let text = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
        path: path.clone(),
        source,
    })?;

    EditorVersion::parse(&text).ok_or(ManifestError::EditorVersionParse { path })
}
