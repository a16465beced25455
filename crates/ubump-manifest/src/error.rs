use std::path::PathBuf;

use thiserror::Error;
use ubump_version::VersionError;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON at '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize JSON for '{path}'")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON object at the top level of '{path}'")]
    NotAnObject { path: PathBuf },

    #[error("project is missing 'Packages/manifest.json' (looked at '{path}')")]
    MissingManifest { path: PathBuf },

    #[error("project is missing 'ProjectSettings/ProjectSettings.asset' (looked at '{path}')")]
    MissingProjectSettings { path: PathBuf },

    #[error("project is missing 'ProjectSettings/ProjectVersion.txt' (looked at '{path}')")]
    MissingProjectVersionFile { path: PathBuf },

    #[error("could not find package settings at '{path}'")]
    MissingPackageSettings { path: PathBuf },

    #[error("could not parse the package's 'name' property in '{path}'")]
    PackageNameParse { path: PathBuf },

    #[error("could not parse the package's 'displayName' property in '{path}'")]
    PackageDisplayNameParse { path: PathBuf },

    #[error("could not parse the package's 'version' property in '{path}'")]
    PackageVersionParse { path: PathBuf },

    #[error("could not parse the project's 'bundleVersion' property in '{path}'")]
    ProjectVersionParse { path: PathBuf },

    #[error("could not parse the project's 'productName' property in '{path}'")]
    ProjectProductNameParse { path: PathBuf },

    #[error("could not parse the project's 'm_EditorVersion' property in '{path}'")]
    EditorVersionParse { path: PathBuf },

    #[error("expected version '{expected}' but found '{actual}' in '{path}'")]
    VerificationFailed {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("invalid version in '{path}'")]
    InvalidVersion {
        path: PathBuf,
        #[source]
        source: VersionError,
    },
}

impl ManifestError {
    /// The version error behind this failure, if the document held an
    /// unparseable version.
    #[must_use]
    pub fn as_version_error(&self) -> Option<&VersionError> {
        match self {
            Self::InvalidVersion { source, .. } => Some(source),
            _ => None,
        }
    }
}
