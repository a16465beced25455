use std::path::{Path, PathBuf};

use crate::Result;

use super::Repository;

impl Repository {
    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    pub fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        let mut index = self.inner.index()?;

        for path in paths {
            let relative_path = self.to_relative_path(path);

            if path.exists() || self.root().join(&relative_path).exists() {
                index.add_path(&relative_path)?;
            } else {
                index.remove_path(&relative_path)?;
            }
            tracing::debug!(path = %relative_path.display(), "staged file");
        }

        index.write()?;
        Ok(())
    }

    /// Stages every modification, deletion and untracked file.
    ///
    /// # Errors
    ///
    /// Returns an error if the staging operation fails.
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.inner.index()?;

        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        Ok(())
    }

    /// Resets the index to HEAD, leaving the working tree untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved or the reset fails.
    pub fn unstage_all(&self) -> Result<()> {
        let head = self.inner.head()?.peel_to_commit()?;
        self.inner
            .reset(head.as_object(), git2::ResetType::Mixed, None)?;
        Ok(())
    }

    /// Paths with staged changes, relative to the repository root.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    pub fn staged_files(&self) -> Result<Vec<PathBuf>> {
        self.paths_with_status(
            git2::Status::INDEX_NEW
                | git2::Status::INDEX_MODIFIED
                | git2::Status::INDEX_DELETED
                | git2::Status::INDEX_RENAMED
                | git2::Status::INDEX_TYPECHANGE,
        )
    }

    /// Tracked modifications not yet staged, followed by untracked files.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    pub fn unstaged_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = self.paths_with_status(
            git2::Status::WT_MODIFIED
                | git2::Status::WT_DELETED
                | git2::Status::WT_RENAMED
                | git2::Status::WT_TYPECHANGE,
        )?;
        files.extend(self.paths_with_status(git2::Status::WT_NEW)?);
        Ok(files)
    }

    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    pub fn has_staged_changes(&self) -> Result<bool> {
        Ok(!self.staged_files()?.is_empty())
    }

    /// # Errors
    ///
    /// Returns an error if the status cannot be computed.
    pub fn has_unstaged_changes(&self) -> Result<bool> {
        Ok(!self.unstaged_files()?.is_empty())
    }

    pub(crate) fn paths_with_status(&self, mask: git2::Status) -> Result<Vec<PathBuf>> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(false),
        ))?;

        Ok(statuses
            .iter()
            .filter(|entry| entry.status().intersects(mask))
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect())
    }
}
