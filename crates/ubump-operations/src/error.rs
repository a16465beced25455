use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] ubump_core::CoreError),

    #[error(transparent)]
    Version(#[from] ubump_version::VersionError),

    #[error(transparent)]
    Manifest(#[from] ubump_manifest::ManifestError),

    #[error(transparent)]
    Git(#[from] ubump_git::GitError),

    #[error(transparent)]
    Project(#[from] ubump_project::ProjectError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("package directory '{0}' is not inside the project")]
    PackageOutsideProject(PathBuf),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OperationError>;
