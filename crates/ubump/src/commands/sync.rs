use std::path::Path;

use ubump_operations::operations::{sync_internal_refs, sync_package_deps};
use ubump_operations::providers::{FileSystemManifestStore, FileSystemProjectProvider};
use ubump_operations::traits::ProjectProvider;

use crate::error::Result;

pub(super) fn package_deps(project_path: &Path, package_path: &Path) -> Result<()> {
    let config = FileSystemProjectProvider::new().load_config(project_path)?;

    let changed = sync_package_deps(
        &FileSystemManifestStore::new(),
        package_path,
        project_path,
        config.sync_editor_version(),
    )?;

    if changed {
        tracing::info!(path = %package_path.display(), "synced package dependencies");
    }
    Ok(())
}

pub(super) fn internal_refs(project_path: &Path) -> Result<()> {
    let provider = FileSystemProjectProvider::new();
    let config = provider.load_config(project_path)?;
    let project = provider.discover_project(project_path, &config)?;

    for path in sync_internal_refs(&FileSystemManifestStore::new(), &project)? {
        tracing::info!(path = %path.display(), "rewrote internal references");
    }
    Ok(())
}
