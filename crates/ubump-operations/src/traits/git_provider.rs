use std::path::{Path, PathBuf};

use ubump_git::{CommitInfo, FileChange, TagInfo};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn repository_root(&self, project_root: &Path) -> Result<PathBuf>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD is detached.
    fn current_branch(&self, project_root: &Path) -> Result<String>;

    /// Upstream of the current branch, such as `origin/master`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn tracking_branch(&self, project_root: &Path) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if either ref cannot be resolved.
    fn commits_ahead(&self, project_root: &Path, tracking: &str, current: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository status cannot be read.
    fn has_unstaged_changes(&self, project_root: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository status cannot be read.
    fn has_staged_changes(&self, project_root: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the repository status cannot be read.
    fn unstaged_files(&self, project_root: &Path) -> Result<Vec<PathBuf>>;

    /// # Errors
    ///
    /// Returns an error if the repository status cannot be read.
    fn staged_files(&self, project_root: &Path) -> Result<Vec<PathBuf>>;

    /// # Errors
    ///
    /// Returns an error if the repository status cannot be read.
    fn uncommitted_files(&self, project_root: &Path) -> Result<Vec<PathBuf>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or diff fails.
    fn changed_files(&self, project_root: &Path, base: &str, head: &str)
    -> Result<Vec<FileChange>>;

    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the index cannot be updated.
    fn stage_all(&self, project_root: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the index cannot be reset.
    fn unstage_all(&self, project_root: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo>;

    /// Undoes the last commit while keeping its changes in the working tree.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD has no parent or the reset fails.
    fn undo_last_commit(&self, project_root: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the push is rejected.
    fn push(&self, project_root: &Path, set_upstream: bool) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the push is rejected.
    fn push_tag(&self, project_root: &Path, tag_name: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn latest_tag(&self, project_root: &Path, pattern: Option<&str>) -> Result<Option<String>>;

    /// One line per commit between `since` and HEAD, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if `since` cannot be resolved.
    fn changelog_since(&self, project_root: &Path, since: Option<&str>) -> Result<Vec<String>>;

    /// Best effort. Returns whether a branch was deleted.
    fn delete_branch(&self, project_root: &Path, branch: &str) -> bool;

    /// # Errors
    ///
    /// Returns an error if `git subtree split` fails.
    fn subtree_split(&self, project_root: &Path, branch: &str, directory: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the checkout fails.
    fn checkout(&self, project_root: &Path, branch: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the push is rejected.
    fn force_push_upstream(&self, project_root: &Path, branch: &str) -> Result<()>;
}
