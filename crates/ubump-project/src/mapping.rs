use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::project::UnityProject;

/// Changed files that fall inside one package directory.
#[derive(Debug)]
pub struct PackageFiles {
    pub package_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Result of mapping changed files to packages.
#[derive(Debug, Default)]
pub struct FileMapping {
    pub package_files: Vec<PackageFiles>,
    pub project_files: Vec<PathBuf>,
}

impl FileMapping {
    #[must_use]
    pub fn affected_package_dirs(&self) -> Vec<&Path> {
        self.package_files
            .iter()
            .filter(|pf| !pf.files.is_empty())
            .map(|pf| pf.package_dir.as_path())
            .collect()
    }

    #[must_use]
    pub fn is_affected(&self, package_dir: &Path) -> bool {
        self.package_files
            .iter()
            .any(|pf| pf.package_dir == package_dir && !pf.files.is_empty())
    }
}

/// Assigns each changed file to the deepest package directory containing it.
/// Relative paths are resolved against `base`, usually the repository root.
#[must_use]
pub fn map_files_to_packages(
    project: &UnityProject,
    changed_files: &[PathBuf],
    base: &Path,
) -> FileMapping {
    let mut package_dirs: Vec<&Path> = project.packages().filter_map(Path::parent).collect();
    package_dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));

    let mut files_by_package: HashMap<&Path, Vec<PathBuf>> = HashMap::new();
    let mut project_files = Vec::new();

    for file in changed_files {
        let absolute = if file.is_absolute() {
            file.clone()
        } else {
            base.join(file)
        };

        match package_dirs.iter().find(|dir| absolute.starts_with(dir)) {
            Some(dir) => files_by_package.entry(*dir).or_default().push(absolute),
            None => project_files.push(absolute),
        }
    }

    let package_files = project
        .packages()
        .filter_map(Path::parent)
        .map(|dir| PackageFiles {
            package_dir: dir.to_path_buf(),
            files: files_by_package.remove(dir).unwrap_or_default(),
        })
        .collect();

    FileMapping {
        package_files,
        project_files,
    }
}
