use std::path::PathBuf;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] if HEAD is not on a branch.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;

        if !head.is_branch() {
            return Err(GitError::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(GitError::DetachedHead)
    }

    /// Short name of the upstream of the current branch, such as
    /// `origin/master`, or `None` when nothing is tracked.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be read.
    pub fn tracking_branch(&self) -> Result<Option<String>> {
        let Ok(branch_name) = self.current_branch() else {
            return Ok(None);
        };

        let branch = self
            .inner
            .find_branch(&branch_name, git2::BranchType::Local)?;

        let Ok(upstream) = branch.upstream() else {
            return Ok(None);
        };

        Ok(upstream.name()?.map(String::from))
    }

    /// `true` when `current` has commits that `tracking` does not.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either reference cannot be resolved.
    pub fn commits_ahead(&self, tracking: &str, current: &str) -> Result<bool> {
        let upstream = self.resolve_commit(tracking)?;
        let local = self.resolve_commit(current)?;

        let (ahead, _behind) = self.inner.graph_ahead_behind(local, upstream)?;
        Ok(ahead > 0)
    }

    /// Files with uncommitted changes in either the index or the working tree,
    /// including untracked files.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    pub fn uncommitted_files(&self) -> Result<Vec<PathBuf>> {
        self.paths_with_status(git2::Status::all().difference(git2::Status::IGNORED))
    }

    pub(crate) fn resolve_commit(&self, refspec: &str) -> Result<git2::Oid> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_commit()
            .map(|commit| commit.id())
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })
    }
}
