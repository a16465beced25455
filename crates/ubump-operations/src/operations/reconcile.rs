use std::path::Path;

use indexmap::IndexMap;
use ubump_manifest::{EditorVersion, PackageDocument};

use crate::Result;
use crate::traits::ManifestStore;

/// Fields of a package that disagree with its containing project, each paired
/// with the project's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub dependencies: Vec<(String, String)>,
    pub environment: Vec<(&'static str, String)>,
}

impl SyncPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.environment.is_empty()
    }

    /// Returns `true` if any field of `document` changed.
    pub fn apply(&self, document: &mut PackageDocument) -> bool {
        let mut changed = false;
        for (name, range) in &self.dependencies {
            changed |= document.set_dependency(name, range);
        }
        for (key, value) in &self.environment {
            changed |= document.set_environment_field(key, value);
        }
        changed
    }
}

/// Only dependencies declared on both sides are compared. Environment fields
/// are compared when `editor` is given and the package already declares them.
#[must_use]
pub fn plan_sync(
    package: &PackageDocument,
    project_dependencies: &IndexMap<String, String>,
    editor: Option<&EditorVersion>,
) -> SyncPlan {
    let dependencies = package
        .dependencies()
        .into_iter()
        .filter_map(|(name, range)| match project_dependencies.get(&name) {
            Some(authoritative) if *authoritative != range => Some((name, authoritative.clone())),
            _ => None,
        })
        .collect();

    let environment = editor
        .map(|editor| {
            editor
                .package_fields()
                .into_iter()
                .filter(|(key, value)| {
                    package
                        .environment_field(key)
                        .is_some_and(|current| current != value.as_str())
                })
                .collect()
        })
        .unwrap_or_default();

    SyncPlan {
        dependencies,
        environment,
    }
}

fn declares_environment(package: &PackageDocument) -> bool {
    ["unity", "unityRelease"]
        .into_iter()
        .any(|key| package.environment_field(key).is_some())
}

fn plan_for<M: ManifestStore + ?Sized>(
    store: &M,
    package: &PackageDocument,
    project_root: &Path,
    sync_editor_version: bool,
) -> Result<SyncPlan> {
    let project_dependencies = store.project_dependencies(project_root)?;
    let editor = if sync_editor_version && declares_environment(package) {
        Some(store.editor_version(project_root)?)
    } else {
        None
    };

    Ok(plan_sync(package, &project_dependencies, editor.as_ref()))
}

/// # Errors
///
/// Returns an error if the package or project documents cannot be read.
pub fn has_syncable_diffs<M: ManifestStore + ?Sized>(
    store: &M,
    package_path: &Path,
    project_root: &Path,
    sync_editor_version: bool,
) -> Result<bool> {
    let package = store.load_package(package_path)?;
    let plan = plan_for(store, &package, project_root, sync_editor_version)?;
    Ok(!plan.is_empty())
}

/// Overwrites drifted fields with the project's values. The package is
/// written once, and only if something changed.
///
/// # Errors
///
/// Returns an error if a document cannot be read or the package cannot be
/// written.
pub fn sync_package_deps<M: ManifestStore + ?Sized>(
    store: &M,
    package_path: &Path,
    project_root: &Path,
    sync_editor_version: bool,
) -> Result<bool> {
    let mut package = store.load_package(package_path)?;
    let plan = plan_for(store, &package, project_root, sync_editor_version)?;

    if !plan.apply(&mut package) {
        tracing::debug!(path = %package_path.display(), "package already in sync");
        return Ok(false);
    }

    store.save_package(&package)?;
    tracing::debug!(
        path = %package.path().display(),
        dependencies = plan.dependencies.len(),
        environment = plan.environment.len(),
        "synced package with project"
    );
    Ok(true)
}
