use std::path::Path;

use ubump_project::{ReleaseConfig, UnityProject, discover_project, load_release_config};

use crate::Result;
use crate::traits::ProjectProvider;

pub struct FileSystemProjectProvider;

impl FileSystemProjectProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemProjectProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectProvider for FileSystemProjectProvider {
    fn load_config(&self, project_root: &Path) -> Result<ReleaseConfig> {
        Ok(load_release_config(project_root)?)
    }

    fn discover_project(
        &self,
        project_root: &Path,
        config: &ReleaseConfig,
    ) -> Result<UnityProject> {
        Ok(discover_project(project_root, config)?)
    }
}
