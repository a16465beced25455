use std::path::Path;

use ubump_manifest::PackageDocument;
use ubump_operations::providers::FileSystemManifestStore;
use ubump_operations::traits::ManifestStore;

use crate::error::Result;

pub(super) fn package_name(package_path: &Path) -> Result<()> {
    let document = PackageDocument::load(package_path)?;
    println!("{}", document.display_name()?);
    Ok(())
}

pub(super) fn package_version(package_path: &Path) -> Result<()> {
    let document = PackageDocument::load(package_path)?;
    println!("{}", document.version()?);
    Ok(())
}

pub(super) fn project_name(project_path: &Path) -> Result<()> {
    let name = FileSystemManifestStore::new().project_name(project_path)?;
    println!("{name}");
    Ok(())
}

pub(super) fn project_version(project_path: &Path) -> Result<()> {
    let version = FileSystemManifestStore::new().project_version(project_path)?;
    println!("{version}");
    Ok(())
}
