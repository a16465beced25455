use std::path::PathBuf;

use crate::{FileChange, GitError, Result};

use super::Repository;

impl Repository {
    /// Files that differ between two commits, with renames detected.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if either base or head cannot be resolved.
    pub fn changed_files(&self, base: &str, head: &str) -> Result<Vec<FileChange>> {
        let base_tree = self.resolve_tree(base)?;
        let head_tree = self.resolve_tree(head)?;

        let mut diff = self
            .inner
            .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), None)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            if !matches!(
                delta.status(),
                git2::Delta::Added
                    | git2::Delta::Deleted
                    | git2::Delta::Modified
                    | git2::Delta::Renamed
                    | git2::Delta::Copied
            ) {
                continue;
            }

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            changes.push(FileChange::new(path));
        }

        Ok(changes)
    }

    fn resolve_tree(&self, refspec: &str) -> Result<git2::Tree<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_tree().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }
}
