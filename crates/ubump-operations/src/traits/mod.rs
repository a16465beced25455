mod git_provider;
mod interaction;
mod manifest_store;
mod project_provider;

pub use git_provider::GitProvider;
pub use interaction::{
    BumpSelection, BumpTarget, CommitDecision, Confirmation, HygieneChoice, InteractionProvider,
    PreidInput, StagedChoice,
};
pub use manifest_store::ManifestStore;
pub use project_provider::ProjectProvider;
