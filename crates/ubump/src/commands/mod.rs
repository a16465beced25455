mod bump;
mod query;
pub(crate) mod release;
mod sync;

use std::path::{Path, PathBuf};

use clap::Subcommand;

pub(crate) use release::ReleaseArgs;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the display name of the package at PACKAGE_PATH
    PackageName {
        /// Package directory or its package.json, relative to the project path
        package_path: PathBuf,
    },
    /// Print the version of the package at PACKAGE_PATH
    PackageVersion {
        /// Package directory or its package.json, relative to the project path
        package_path: PathBuf,
    },
    /// Print the product name of the project
    ProjectName,
    /// Print the bundle version of the project
    ProjectVersion,
    /// Bump a version and print the result
    BumpVersion {
        version: String,
        /// One of patch, minor, major, prepatch, preminor, premajor, prerelease
        bump_type: String,
        /// Prerelease identifier (default: the current one, else "prerelease")
        preid: Option<String>,
    },
    /// Bump the version of the package at PACKAGE_PATH and print it
    BumpPackage {
        package_path: PathBuf,
        bump_type: String,
        preid: Option<String>,
    },
    /// Bump the project version and print it
    BumpProject {
        bump_type: String,
        preid: Option<String>,
    },
    /// Align a package's dependencies and editor version with the project
    SyncPackageDeps { package_path: PathBuf },
    /// Point every package-to-package dependency at the current version
    SyncInternalRefs,
}

impl Commands {
    pub(crate) fn execute(self, project_path: &Path) -> Result<()> {
        match self {
            Self::PackageName { package_path } => {
                query::package_name(&project_path.join(package_path))
            }
            Self::PackageVersion { package_path } => {
                query::package_version(&project_path.join(package_path))
            }
            Self::ProjectName => query::project_name(project_path),
            Self::ProjectVersion => query::project_version(project_path),
            Self::BumpVersion {
                version,
                bump_type,
                preid,
            } => bump::version(&version, &bump_type, preid.as_deref()),
            Self::BumpPackage {
                package_path,
                bump_type,
                preid,
            } => bump::package(&project_path.join(package_path), &bump_type, preid.as_deref()),
            Self::BumpProject { bump_type, preid } => {
                bump::project(project_path, &bump_type, preid.as_deref())
            }
            Self::SyncPackageDeps { package_path } => {
                sync::package_deps(project_path, &project_path.join(package_path))
            }
            Self::SyncInternalRefs => sync::internal_refs(project_path),
        }
    }
}
