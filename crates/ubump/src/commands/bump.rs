use std::path::Path;

use ubump_operations::operations::BumpOperation;
use ubump_operations::providers::FileSystemManifestStore;
use ubump_version::bump_version_str;

use crate::error::Result;

pub(super) fn version(version: &str, bump_type: &str, preid: Option<&str>) -> Result<()> {
    let bumped = bump_version_str(version, bump_type, preid)?;
    println!("{bumped}");
    Ok(())
}

pub(super) fn package(package_path: &Path, bump_type: &str, preid: Option<&str>) -> Result<()> {
    let operation = BumpOperation::new(FileSystemManifestStore::new());
    let bumped = operation.bump_package(package_path, bump_type, preid)?;
    println!("{bumped}");
    Ok(())
}

pub(super) fn project(project_path: &Path, bump_type: &str, preid: Option<&str>) -> Result<()> {
    let operation = BumpOperation::new(FileSystemManifestStore::new());
    let bumped = operation.bump_project(project_path, bump_type, preid)?;
    println!("{bumped}");
    Ok(())
}
