use std::path::Path;

use semver::Version;
use ubump_core::BumpType;
use ubump_version::bump_version;

use crate::Result;
use crate::traits::ManifestStore;

/// Every bump type with the version it would produce from `current`, using
/// the default prerelease identifier.
///
/// # Errors
///
/// Returns an error if a bump cannot be computed.
pub fn bump_previews(current: &Version) -> Result<Vec<(BumpType, Version)>> {
    BumpType::ALL
        .into_iter()
        .map(|bump| Ok((bump, bump_version(current, bump, None)?)))
        .collect()
}

/// Non-interactive bumps of a single package or of the project.
pub struct BumpOperation<M> {
    store: M,
}

impl<M: ManifestStore> BumpOperation<M> {
    pub fn new(store: M) -> Self {
        Self { store }
    }

    /// The package version is read and validated before `bump_type` is.
    ///
    /// # Errors
    ///
    /// Returns an error if the package is missing or has no valid version,
    /// if `bump_type` is unknown, or if the package cannot be written.
    pub fn bump_package(
        &self,
        package_path: &Path,
        bump_type: &str,
        preid: Option<&str>,
    ) -> Result<Version> {
        let mut document = self.store.load_package(package_path)?;
        let current = document.version()?;
        let bump: BumpType = bump_type.parse()?;

        let bumped = bump_version(&current, bump, preid)?;
        document.set_version(&bumped)?;
        self.store.save_package(&document)?;

        tracing::debug!(path = %document.path().display(), from = %current, to = %bumped, "bumped package");
        Ok(bumped)
    }

    /// # Errors
    ///
    /// Returns an error if the project settings are missing or have no valid
    /// version, if `bump_type` is unknown, or if the write fails verification.
    pub fn bump_project(
        &self,
        project_root: &Path,
        bump_type: &str,
        preid: Option<&str>,
    ) -> Result<Version> {
        let current = self.store.project_version(project_root)?;
        let bump: BumpType = bump_type.parse()?;

        let bumped = bump_version(&current, bump, preid)?;
        self.store.write_project_version(project_root, &bumped)?;

        tracing::debug!(from = %current, to = %bumped, "bumped project");
        Ok(bumped)
    }
}
