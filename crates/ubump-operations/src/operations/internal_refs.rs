use std::path::PathBuf;

use indexmap::IndexMap;
use semver::Version;
use ubump_project::UnityProject;
use ubump_version::rewrite_embedded_version;

use crate::Result;
use crate::traits::ManifestStore;

/// Points every dependency between packages of `project` at the current
/// version of the referenced package. Only the version inside each range is
/// replaced, so operators such as `^` or `~` survive.
///
/// Returns the manifests that were rewritten.
///
/// # Errors
///
/// Returns an error if a package cannot be read or written, or lacks a name
/// or version.
pub fn sync_internal_refs<M: ManifestStore + ?Sized>(
    store: &M,
    project: &UnityProject,
) -> Result<Vec<PathBuf>> {
    let mut documents = project
        .packages()
        .map(|path| store.load_package(path))
        .collect::<Result<Vec<_>>>()?;

    let mut versions: IndexMap<String, Version> = IndexMap::new();
    for document in &documents {
        versions.insert(document.formal_name()?.to_string(), document.version()?);
    }

    let mut rewritten = Vec::new();
    for document in &mut documents {
        let own_name = document.formal_name()?.to_string();
        let mut changed = false;

        for (name, range) in document.dependencies() {
            if name == own_name {
                continue;
            }
            let Some(version) = versions.get(&name) else {
                continue;
            };
            if let Some(updated) = rewrite_embedded_version(&range, version) {
                tracing::debug!(package = %own_name, dependency = %name, from = %range, to = %updated, "rewrote internal reference");
                changed |= document.set_dependency(&name, &updated);
            }
        }

        if changed {
            store.save_package(document)?;
            rewritten.push(document.path().to_path_buf());
        }
    }

    Ok(rewritten)
}
