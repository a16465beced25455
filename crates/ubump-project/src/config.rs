use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use crate::CONFIG_FILE;
use crate::error::ProjectError;

const DEFAULT_TAG_PREFIX: &str = "v";
const DEFAULT_EXPECTED_UPSTREAM: &str = "origin/master";

/// Directories never searched for packages.
const BUILTIN_IGNORED_DIRS: [&str; 9] = [
    "Library",
    "Temp",
    "Logs",
    "obj",
    "Build",
    "Builds",
    "UserSettings",
    "node_modules",
    ".git",
];

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawReleaseConfig {
    project_tag_prefix: Option<String>,
    package_tag_prefix: Option<String>,
    expected_upstream: Option<String>,
    sync_editor_version: Option<bool>,
    #[serde(default)]
    ignored_dirs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    project_tag_prefix: String,
    package_tag_prefix: String,
    expected_upstream: String,
    sync_editor_version: bool,
    ignored_dirs: GlobSet,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            project_tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            package_tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            expected_upstream: DEFAULT_EXPECTED_UPSTREAM.to_string(),
            sync_editor_version: true,
            ignored_dirs: build_glob_set(&[]).unwrap_or_else(|_| GlobSet::empty()),
        }
    }
}

impl ReleaseConfig {
    #[must_use]
    pub fn project_tag_prefix(&self) -> &str {
        &self.project_tag_prefix
    }

    #[must_use]
    pub fn package_tag_prefix(&self) -> &str {
        &self.package_tag_prefix
    }

    /// Upstream the working branch is expected to track, e.g. `origin/master`.
    #[must_use]
    pub fn expected_upstream(&self) -> &str {
        &self.expected_upstream
    }

    #[must_use]
    pub fn sync_editor_version(&self) -> bool {
        self.sync_editor_version
    }

    /// Matches a directory by its name or by its path relative to the
    /// project root.
    #[must_use]
    pub fn is_ignored_dir(&self, relative: &Path) -> bool {
        let by_name = relative
            .file_name()
            .is_some_and(|name| self.ignored_dirs.is_match(name));
        by_name || self.ignored_dirs.is_match(relative)
    }

    #[must_use]
    pub fn with_project_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.project_tag_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_package_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.package_tag_prefix = prefix.into();
        self
    }
}

fn build_glob_set(extra: &[String]) -> Result<GlobSet, ProjectError> {
    let mut builder = GlobSetBuilder::new();
    let patterns = BUILTIN_IGNORED_DIRS
        .iter()
        .map(|p| (*p).to_string())
        .chain(extra.iter().cloned());

    for pattern in patterns {
        let glob = Glob::new(&pattern).map_err(|source| ProjectError::GlobPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjectError::GlobPattern {
        pattern: extra.join(", "),
        source,
    })
}

/// # Errors
///
/// Returns `ProjectError::ConfigParse` for malformed TOML or unknown keys and
/// `ProjectError::GlobPattern` for an invalid `ignored-dirs` entry.
pub fn parse_release_config(content: &str, path: &Path) -> Result<ReleaseConfig, ProjectError> {
    let raw: RawReleaseConfig =
        toml::from_str(content).map_err(|source| ProjectError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    let defaults = ReleaseConfig::default();
    Ok(ReleaseConfig {
        project_tag_prefix: raw
            .project_tag_prefix
            .unwrap_or(defaults.project_tag_prefix),
        package_tag_prefix: raw
            .package_tag_prefix
            .unwrap_or(defaults.package_tag_prefix),
        expected_upstream: raw.expected_upstream.unwrap_or(defaults.expected_upstream),
        sync_editor_version: raw
            .sync_editor_version
            .unwrap_or(defaults.sync_editor_version),
        ignored_dirs: build_glob_set(&raw.ignored_dirs)?,
    })
}

/// Loads `.ubump.toml` from the project root, falling back to defaults when
/// the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_release_config(root: &Path) -> Result<ReleaseConfig, ProjectError> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ReleaseConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ProjectError::ConfigRead {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "loaded release config");
    parse_release_config(&content, &path)
}
