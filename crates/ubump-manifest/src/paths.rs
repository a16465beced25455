use std::path::{Path, PathBuf};

pub const PACKAGE_MANIFEST: &str = "package.json";
pub const PROJECT_MANIFEST: &str = "Packages/manifest.json";
pub const PROJECT_SETTINGS: &str = "ProjectSettings/ProjectSettings.asset";
pub const PROJECT_VERSION_FILE: &str = "ProjectSettings/ProjectVersion.txt";

/// Accepts either a directory or the artifact itself and returns the path of
/// the artifact. Paths that already end in `relative` are returned unchanged.
#[must_use]
pub fn resolve_path(path: &Path, relative: &str) -> PathBuf {
    if path.ends_with(relative) {
        path.to_path_buf()
    } else {
        path.join(relative)
    }
}
