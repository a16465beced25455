use crate::{CommitInfo, GitError, Result};

use super::Repository;

impl Repository {
    /// # Errors
    ///
    /// Returns an error if the commit cannot be created.
    pub fn commit(&self, message: &str) -> Result<CommitInfo> {
        let sig = self.inner.signature()?;
        let mut index = self.inner.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.inner.find_tree(tree_id)?;

        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());

        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let commit_oid = self
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        let sha = commit_oid.to_string();
        tracing::debug!(%sha, "created commit");

        Ok(CommitInfo {
            sha,
            message: message.to_string(),
        })
    }

    /// Moves HEAD back one commit and resets the index to it. The working
    /// tree keeps every modification made by the undone commit.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if HEAD has no parent.
    pub fn undo_last_commit(&self) -> Result<()> {
        let head = self.inner.head()?.peel_to_commit()?;
        let parent = head.parent(0).map_err(|_| GitError::RefNotFound {
            refspec: "HEAD~1".to_string(),
        })?;

        self.inner
            .reset(parent.as_object(), git2::ResetType::Mixed, None)?;

        tracing::debug!(undone = %head.id(), "rolled back last commit");
        Ok(())
    }
}
