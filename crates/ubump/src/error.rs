use thiserror::Error;

use crate::environment::NonInteractiveReason;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] ubump_operations::OperationError),

    #[error(transparent)]
    Version(#[from] ubump_version::VersionError),

    #[error(transparent)]
    Manifest(#[from] ubump_manifest::ManifestError),

    #[error(transparent)]
    Project(#[from] ubump_project::ProjectError),

    #[error("failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("interactive mode requires a terminal ({0})")]
    NotInteractive(NonInteractiveReason),

    #[error("subtree split failed for {failed} of {total} package(s)")]
    SplitsFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, CliError>;
