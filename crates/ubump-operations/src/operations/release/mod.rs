mod message;
mod operation;
mod session;

pub use message::commit_message;
pub use operation::{ReleaseInput, ReleaseOperation, ReleaseOutcome};
pub use session::{ReleaseSession, SplitReport, TagOutcome};
