use std::path::{Path, PathBuf};

use ubump_manifest::{PACKAGE_MANIFEST, PROJECT_SETTINGS};

use crate::config::ReleaseConfig;
use crate::error::ProjectError;

/// A Unity project root together with the `package.json` files found below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnityProject {
    root: PathBuf,
    package_manifests: Vec<PathBuf>,
    root_is_package: bool,
}

/// Finite iterator over discovered package manifests in path order. Calling
/// [`UnityProject::packages`] again starts a fresh pass.
#[derive(Debug, Clone)]
pub struct PackagePaths<'a> {
    inner: std::slice::Iter<'a, PathBuf>,
}

impl<'a> Iterator for PackagePaths<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(PathBuf::as_path)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for PackagePaths<'_> {}

impl UnityProject {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn packages(&self) -> PackagePaths<'_> {
        PackagePaths {
            inner: self.package_manifests.iter(),
        }
    }

    /// `true` when the project root itself holds a `package.json`, in which
    /// case packages are never split into subtree branches.
    #[must_use]
    pub fn root_is_package(&self) -> bool {
        self.root_is_package
    }
}

/// Validates that `root` is a Unity project and collects every package
/// manifest below it, skipping ignored directories.
///
/// # Errors
///
/// Returns `ProjectError::NotAProject` when the project settings asset is
/// missing, or `ProjectError::DirectoryRead` if a directory cannot be listed.
pub fn discover_project(root: &Path, config: &ReleaseConfig) -> Result<UnityProject, ProjectError> {
    let root = dunce::canonicalize(root).map_err(|_| ProjectError::NotAProject {
        path: root.to_path_buf(),
    })?;

    if !root.join(PROJECT_SETTINGS).is_file() {
        return Err(ProjectError::NotAProject { path: root });
    }

    let mut package_manifests = Vec::new();
    let mut pending = vec![root.clone()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|source| ProjectError::DirectoryRead {
            path: dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| ProjectError::DirectoryRead {
                path: dir.clone(),
                source,
            })?;
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();

            if file_type.is_dir() {
                let relative = path.strip_prefix(&root).unwrap_or(&path);
                if !config.is_ignored_dir(relative) {
                    pending.push(path);
                }
            } else if file_type.is_file() && entry.file_name() == PACKAGE_MANIFEST && dir != root {
                package_manifests.push(path);
            }
        }
    }

    package_manifests.sort();
    let root_is_package = root.join(PACKAGE_MANIFEST).is_file();

    tracing::debug!(
        root = %root.display(),
        packages = package_manifests.len(),
        root_is_package,
        "discovered project"
    );

    Ok(UnityProject {
        root,
        package_manifests,
        root_is_package,
    })
}
