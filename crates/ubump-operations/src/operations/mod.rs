mod bump;
mod internal_refs;
mod reconcile;
mod release;

pub use bump::{BumpOperation, bump_previews};
pub use internal_refs::sync_internal_refs;
pub use reconcile::{SyncPlan, has_syncable_diffs, plan_sync, sync_package_deps};
pub use release::{
    ReleaseInput, ReleaseOperation, ReleaseOutcome, ReleaseSession, SplitReport, TagOutcome,
    commit_message,
};
