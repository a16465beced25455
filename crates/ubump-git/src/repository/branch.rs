use crate::Result;

use super::Repository;

impl Repository {
    /// Deletes a local branch. Failure is reported through the return value
    /// and never raised.
    #[must_use]
    pub fn delete_branch(&self, name: &str) -> bool {
        let deleted = self
            .inner
            .find_branch(name, git2::BranchType::Local)
            .and_then(|mut branch| branch.delete());

        match deleted {
            Ok(()) => {
                tracing::debug!(branch = name, "deleted branch");
                true
            }
            Err(e) => {
                tracing::debug!(branch = name, error = %e, "branch not deleted");
                false
            }
        }
    }

    #[must_use]
    pub fn branch_exists(&self, name: &str) -> bool {
        self.inner
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
    }

    /// Switches the working tree to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::CommandFailed`] if git refuses the checkout.
    pub fn checkout(&self, name: &str) -> Result<()> {
        self.run_git(&["checkout", name])?;
        tracing::debug!(branch = name, "checked out");
        Ok(())
    }
}
