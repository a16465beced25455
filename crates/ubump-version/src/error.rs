use thiserror::Error;
use ubump_core::CoreError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("version '{input}' is invalid")]
    InvalidVersion { input: String },

    #[error("bump type '{input}' is invalid")]
    InvalidBumpType { input: String },

    #[error("prerelease identifier '{identifier}' is invalid")]
    InvalidPrereleaseIdentifier { identifier: String },
}

impl From<CoreError> for VersionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidBumpType { input } => Self::InvalidBumpType { input },
        }
    }
}
