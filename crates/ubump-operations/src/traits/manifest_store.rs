use std::path::Path;

use indexmap::IndexMap;
use semver::Version;
use ubump_manifest::{EditorVersion, PackageDocument};

use crate::Result;

/// Field-level access to package and project documents. Every call reads
/// from disk so edits made between steps are picked up.
pub trait ManifestStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the package document is missing or malformed.
    fn load_package(&self, path: &Path) -> Result<PackageDocument>;

    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save_package(&self, document: &PackageDocument) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the project settings are missing or malformed.
    fn project_version(&self, project_root: &Path) -> Result<Version>;

    /// # Errors
    ///
    /// Returns an error if the project settings are missing or malformed.
    fn project_name(&self, project_root: &Path) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the field is missing or does not read back as
    /// `version` after the write.
    fn write_project_version(&self, project_root: &Path, version: &Version) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if `Packages/manifest.json` is missing or malformed.
    fn project_dependencies(&self, project_root: &Path) -> Result<IndexMap<String, String>>;

    /// # Errors
    ///
    /// Returns an error if the editor version marker is missing or malformed.
    fn editor_version(&self, project_root: &Path) -> Result<EditorVersion>;
}
