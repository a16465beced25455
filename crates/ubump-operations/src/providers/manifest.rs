use std::path::Path;

use indexmap::IndexMap;
use semver::Version;
use ubump_manifest::{EditorVersion, PackageDocument};

use crate::Result;
use crate::traits::ManifestStore;

pub struct FileSystemManifestStore;

impl FileSystemManifestStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemManifestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore for FileSystemManifestStore {
    fn load_package(&self, path: &Path) -> Result<PackageDocument> {
        Ok(PackageDocument::load(path)?)
    }

    fn save_package(&self, document: &PackageDocument) -> Result<()> {
        Ok(document.save()?)
    }

    fn project_version(&self, project_root: &Path) -> Result<Version> {
        Ok(ubump_manifest::read_project_version(project_root)?)
    }

    fn project_name(&self, project_root: &Path) -> Result<String> {
        Ok(ubump_manifest::read_project_name(project_root)?)
    }

    fn write_project_version(&self, project_root: &Path, version: &Version) -> Result<()> {
        Ok(ubump_manifest::write_project_version(project_root, version)?)
    }

    fn project_dependencies(&self, project_root: &Path) -> Result<IndexMap<String, String>> {
        Ok(ubump_manifest::read_project_dependencies(project_root)?)
    }

    fn editor_version(&self, project_root: &Path) -> Result<EditorVersion> {
        Ok(ubump_manifest::read_editor_version(project_root)?)
    }
}
