use std::path::Path;

use ubump_project::{ReleaseConfig, UnityProject};

use crate::Result;

pub trait ProjectProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if `.ubump.toml` exists but cannot be parsed.
    fn load_config(&self, project_root: &Path) -> Result<ReleaseConfig>;

    /// # Errors
    ///
    /// Returns an error if `project_root` is not a Unity project.
    fn discover_project(&self, project_root: &Path, config: &ReleaseConfig)
    -> Result<UnityProject>;
}
