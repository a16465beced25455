use crate::{GitError, Result, TagInfo};

use super::Repository;

impl Repository {
    #[must_use]
    pub fn tag_exists(&self, name: &str) -> bool {
        self.inner
            .find_reference(&format!("refs/tags/{name}"))
            .is_ok()
    }

    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::TagAlreadyExists`] if the name is taken; nothing is
    /// created in that case.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        if self.tag_exists(name) {
            return Err(GitError::TagAlreadyExists {
                name: name.to_string(),
            });
        }

        let head = self.inner.head()?.peel_to_commit()?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, head.as_object(), &sig, message, false)?;

        tracing::debug!(tag = name, target = %head.id(), "created tag");

        Ok(TagInfo {
            name: name.to_string(),
            target_sha: head.id().to_string(),
        })
    }

    /// Nearest annotated tag reachable from HEAD, optionally restricted to a
    /// glob such as `tool/*`.
    ///
    /// # Errors
    ///
    /// Returns an error if the describe operation fails for a reason other
    /// than there being no matching tag.
    pub fn latest_tag(&self, pattern: Option<&str>) -> Result<Option<String>> {
        let mut options = git2::DescribeOptions::new();
        if let Some(pattern) = pattern {
            options.pattern(pattern);
        }

        let describe = match self.inner.describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let name = describe.format(Some(
            git2::DescribeFormatOptions::new().abbreviated_size(0),
        ))?;
        Ok(Some(name))
    }
}
