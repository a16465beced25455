use std::path::PathBuf;

use semver::Version;
use ubump_core::BumpType;

use crate::Result;

/// What a bump prompt is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpTarget<'a> {
    Project(&'a str),
    Package(&'a str),
}

impl BumpTarget<'_> {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Project(name) | Self::Package(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpSelection {
    Selected(BumpType),
    NoChange,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreidInput {
    Provided(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HygieneChoice {
    Leave,
    StageAll,
    List,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedChoice {
    Keep,
    Unstage,
    List,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitDecision {
    Commit(String),
    Skip,
    Cancelled,
}

/// Every decision the release workflow waits on.
pub trait InteractionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_untracked_branch(&self, current: &str, expected: &str) -> Result<Confirmation>;

    /// `after_listing` is set when the files were just shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn unstaged_changes(&self, after_listing: bool) -> Result<HygieneChoice>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn staged_changes(&self, after_listing: bool) -> Result<StagedChoice>;

    /// # Errors
    ///
    /// Returns an error if the files cannot be shown.
    fn show_files(&self, files: &[PathBuf]) -> Result<()>;

    /// `previews` holds every bump type with the version it would produce.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select_bump(
        &self,
        target: BumpTarget<'_>,
        current: &Version,
        previews: &[(BumpType, Version)],
    ) -> Result<BumpSelection>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn input_preid(&self, default: &str) -> Result<PreidInput>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_version(&self, version: &Version) -> Result<Confirmation>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_dependency_sync(&self, package_name: &str) -> Result<Confirmation>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn commit_decision(&self, message: &str) -> Result<CommitDecision>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_push(&self) -> Result<Confirmation>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_subtree_split(&self, package_count: usize) -> Result<Confirmation>;

    /// Second confirmation asked before pushing and before splitting.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_again(&self) -> Result<Confirmation>;
}
