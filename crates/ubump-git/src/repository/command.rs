use std::process::Command;

use crate::{GitError, Result};

use super::Repository;

const REMOTE: &str = "origin";

impl Repository {
    pub(crate) fn run_git(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));

        let output = Command::new("git")
            .arg("-C")
            .arg(self.root())
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed { command, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Pushes the current branch together with reachable annotated tags.
    /// With `set_upstream`, the branch is published to `origin` and tracked.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] if the push is rejected.
    pub fn push(&self, set_upstream: bool) -> Result<()> {
        if set_upstream {
            let branch = self.current_branch()?;
            self.run_git(&["push", "--follow-tags", "-u", REMOTE, &branch])?;
        } else {
            self.run_git(&["push", "--follow-tags"])?;
        }
        tracing::debug!(set_upstream, "pushed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] if the push is rejected.
    pub fn push_tag(&self, name: &str) -> Result<()> {
        let refspec = format!("refs/tags/{name}");
        self.run_git(&["push", REMOTE, &refspec])?;
        tracing::debug!(tag = name, "pushed tag");
        Ok(())
    }

    /// Force-pushes `branch` to `origin` and sets it as the upstream.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] if the push is rejected.
    pub fn force_push_upstream(&self, branch: &str) -> Result<()> {
        self.run_git(&["push", "--follow-tags", "-fu", REMOTE, branch])?;
        tracing::debug!(branch, "force pushed");
        Ok(())
    }

    /// Extracts the history of `directory` (relative to the repository root)
    /// into the local branch `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommandFailed`] if `git subtree` fails or is not
    /// installed.
    pub fn subtree_split(&self, branch: &str, directory: &str) -> Result<()> {
        self.run_git(&["subtree", "split", "-P", directory, "-b", branch])?;
        tracing::debug!(branch, directory, "split subtree");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_file, setup_test_repo};
    use crate::GitError;
    use tempfile::TempDir;

    fn add_bare_origin(repo: &super::Repository) -> anyhow::Result<TempDir> {
        let remote_dir = TempDir::new()?;
        git2::Repository::init_bare(remote_dir.path())?;
        let url = remote_dir.path().to_string_lossy().to_string();
        repo.inner.remote("origin", &url)?;
        Ok(remote_dir)
    }

    #[test]
    fn push_with_upstream_tracks_origin() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let remote_dir = add_bare_origin(&repo)?;
        let branch = repo.current_branch()?;

        repo.push(true)?;

        assert_eq!(repo.tracking_branch()?, Some(format!("origin/{branch}")));
        let remote = git2::Repository::open_bare(remote_dir.path())?;
        assert!(remote.find_branch(&branch, git2::BranchType::Local).is_ok());
        Ok(())
    }

    #[test]
    fn push_tag_publishes_tag() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let remote_dir = add_bare_origin(&repo)?;
        repo.push(true)?;
        repo.create_tag("v1.0.0", "Release v1.0.0\n")?;

        repo.push_tag("v1.0.0")?;

        let remote = git2::Repository::open_bare(remote_dir.path())?;
        assert!(remote.find_reference("refs/tags/v1.0.0").is_ok());
        Ok(())
    }

    #[test]
    fn force_push_replaces_remote_branch() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let remote_dir = add_bare_origin(&repo)?;
        let head = repo.inner.head()?.peel_to_commit()?;
        repo.inner.branch("tool", &head, false)?;
        repo.force_push_upstream("tool")?;

        commit_file(&repo, "a.txt", "a", "Add a")?;
        let rewritten = repo.inner.head()?.peel_to_commit()?;
        repo.inner.branch("tool", &rewritten, true)?;
        repo.force_push_upstream("tool")?;

        let remote = git2::Repository::open_bare(remote_dir.path())?;
        let remote_tip = remote
            .find_branch("tool", git2::BranchType::Local)?
            .get()
            .peel_to_commit()?
            .id();
        assert_eq!(remote_tip, rewritten.id());
        Ok(())
    }

    #[test]
    fn push_without_remote_fails_with_command_error() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.push(true);

        assert!(matches!(result, Err(GitError::CommandFailed { .. })));
        Ok(())
    }

    #[test]
    fn subtree_split_of_missing_directory_fails() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.subtree_split("tool", "Assets/Missing");

        assert!(matches!(result, Err(GitError::CommandFailed { .. })));
        Ok(())
    }
}
