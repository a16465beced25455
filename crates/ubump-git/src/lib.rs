mod error;
mod repository;
mod types;

pub use error::GitError;
pub use repository::Repository;
pub use types::{CommitInfo, FileChange, TagInfo};

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns an error if the path is not a git repository or if HEAD is detached.
pub fn current_branch(path: &Path) -> Result<String> {
    Repository::open(path)?.current_branch()
}

/// # Errors
///
/// Returns an error if the path is not a git repository.
pub fn tracking_branch(path: &Path) -> Result<Option<String>> {
    Repository::open(path)?.tracking_branch()
}
