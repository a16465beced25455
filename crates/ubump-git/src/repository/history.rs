use crate::Result;

use super::Repository;

impl Repository {
    /// One-line summaries (`<short sha> <subject>`) of the commits reachable
    /// from HEAD but not from `since`, newest first. With no `since`, the
    /// whole history is listed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GitError::RefNotFound`] if `since` cannot be resolved.
    pub fn changelog_since(&self, since: Option<&str>) -> Result<Vec<String>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(since) = since {
            revwalk.hide(self.resolve_commit(since)?)?;
        }

        let mut lines = Vec::new();
        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            let short = commit.as_object().short_id()?;
            let short = short.as_str().unwrap_or_default().to_string();
            let summary = commit.summary().unwrap_or_default();
            lines.push(format!("{short} {summary}"));
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_file, setup_test_repo};
    use crate::GitError;

    #[test]
    fn lists_commits_since_reference() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        repo.create_tag("v1.0.0", "Release v1.0.0")?;
        commit_file(&repo, "a.txt", "a", "Add a")?;
        commit_file(&repo, "b.txt", "b", "Add b\n\nWith a body")?;

        let changelog = repo.changelog_since(Some("v1.0.0"))?;

        assert_eq!(changelog.len(), 2);
        assert!(changelog[0].ends_with(" Add b"));
        assert!(changelog[1].ends_with(" Add a"));
        Ok(())
    }

    #[test]
    fn without_reference_lists_everything() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        commit_file(&repo, "a.txt", "a", "Add a")?;

        let changelog = repo.changelog_since(None)?;

        assert_eq!(changelog.len(), 2);
        assert!(changelog[1].ends_with(" Initial commit"));
        Ok(())
    }

    #[test]
    fn unknown_reference_is_reported() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.changelog_since(Some("does-not-exist"));

        assert!(matches!(result, Err(GitError::RefNotFound { .. })));
        Ok(())
    }
}
