use semver::Version;
use ubump_core::BumpResult;
use ubump_git::CommitInfo;

use crate::error::OperationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    Created(String),
    /// The name was taken; nothing was tagged and the run went on.
    AlreadyExists(String),
}

impl TagOutcome {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Created(name) | Self::AlreadyExists(name) => name,
        }
    }
}

/// What happened to one package during subtree splitting.
#[derive(Debug)]
pub struct SplitReport {
    pub package: String,
    pub branch: String,
    pub tag: Option<TagOutcome>,
    pub error: Option<OperationError>,
}

impl SplitReport {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// State of one release run. Lives until the run ends.
#[derive(Debug, Default)]
pub struct ReleaseSession {
    pub project_bump: Option<Version>,
    pub package_bumps: Vec<BumpResult>,
    pub committed: bool,
    pub commit: Option<CommitInfo>,
    pub pushed: bool,
    pub project_tag: Option<TagOutcome>,
    pub splits: Vec<SplitReport>,
}

impl ReleaseSession {
    #[must_use]
    pub fn has_bumps(&self) -> bool {
        self.project_bump.is_some() || !self.package_bumps.is_empty()
    }

    /// A commit that has not reached the remote yet is undone on cancellation.
    #[must_use]
    pub fn needs_rollback(&self) -> bool {
        self.committed && !self.pushed
    }
}
