use std::path::{Path, PathBuf};

use ubump_git::{CommitInfo, FileChange, Repository, TagInfo};

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn repository_root(&self, project_root: &Path) -> Result<PathBuf> {
        let repo = Repository::open(project_root)?;
        Ok(repo.root().to_path_buf())
    }

    fn current_branch(&self, project_root: &Path) -> Result<String> {
        let repo = Repository::open(project_root)?;
        Ok(repo.current_branch()?)
    }

    fn tracking_branch(&self, project_root: &Path) -> Result<Option<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.tracking_branch()?)
    }

    fn commits_ahead(&self, project_root: &Path, tracking: &str, current: &str) -> Result<bool> {
        let repo = Repository::open(project_root)?;
        Ok(repo.commits_ahead(tracking, current)?)
    }

    fn has_unstaged_changes(&self, project_root: &Path) -> Result<bool> {
        let repo = Repository::open(project_root)?;
        Ok(repo.has_unstaged_changes()?)
    }

    fn has_staged_changes(&self, project_root: &Path) -> Result<bool> {
        let repo = Repository::open(project_root)?;
        Ok(repo.has_staged_changes()?)
    }

    fn unstaged_files(&self, project_root: &Path) -> Result<Vec<PathBuf>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.unstaged_files()?)
    }

    fn staged_files(&self, project_root: &Path) -> Result<Vec<PathBuf>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.staged_files()?)
    }

    fn uncommitted_files(&self, project_root: &Path) -> Result<Vec<PathBuf>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.uncommitted_files()?)
    }

    fn changed_files(
        &self,
        project_root: &Path,
        base: &str,
        head: &str,
    ) -> Result<Vec<FileChange>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.changed_files(base, head)?)
    }

    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.stage_files(paths)?)
    }

    fn stage_all(&self, project_root: &Path) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.stage_all()?)
    }

    fn unstage_all(&self, project_root: &Path) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.unstage_all()?)
    }

    fn commit(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(project_root)?;
        Ok(repo.commit(message)?)
    }

    fn undo_last_commit(&self, project_root: &Path) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.undo_last_commit()?)
    }

    fn push(&self, project_root: &Path, set_upstream: bool) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.push(set_upstream)?)
    }

    fn push_tag(&self, project_root: &Path, tag_name: &str) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.push_tag(tag_name)?)
    }

    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        let repo = Repository::open(project_root)?;
        Ok(repo.create_tag(tag_name, message)?)
    }

    fn latest_tag(&self, project_root: &Path, pattern: Option<&str>) -> Result<Option<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.latest_tag(pattern)?)
    }

    fn changelog_since(&self, project_root: &Path, since: Option<&str>) -> Result<Vec<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.changelog_since(since)?)
    }

    fn delete_branch(&self, project_root: &Path, branch: &str) -> bool {
        match Repository::open(project_root) {
            Ok(repo) => repo.delete_branch(branch),
            Err(e) => {
                tracing::warn!(branch, error = %e, "could not open repository to delete branch");
                false
            }
        }
    }

    fn subtree_split(&self, project_root: &Path, branch: &str, directory: &str) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.subtree_split(branch, directory)?)
    }

    fn checkout(&self, project_root: &Path, branch: &str) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.checkout(branch)?)
    }

    fn force_push_upstream(&self, project_root: &Path, branch: &str) -> Result<()> {
        let repo = Repository::open(project_root)?;
        Ok(repo.force_push_upstream(branch)?)
    }
}
