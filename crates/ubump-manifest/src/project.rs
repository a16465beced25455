use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use semver::Version;
use serde_json::Value;
use ubump_version::parse_document_version;

use crate::Result;
use crate::error::ManifestError;
use crate::field::LabeledField;
use crate::paths::{PROJECT_MANIFEST, PROJECT_SETTINGS, resolve_path};

static BUNDLE_VERSION: LazyLock<LabeledField> = LazyLock::new(|| LabeledField::new("bundleVersion"));
static PRODUCT_NAME: LazyLock<LabeledField> = LazyLock::new(|| LabeledField::new("productName"));

fn settings_path(path: &Path) -> Result<PathBuf> {
    let path = resolve_path(path, PROJECT_SETTINGS);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ManifestError::MissingProjectSettings { path })
    }
}

/// Reads `ProjectSettings/ProjectSettings.asset` from a project root, or from
/// the asset path itself.
///
/// # Errors
///
/// Returns `ManifestError::MissingProjectSettings` if the asset does not exist.
pub fn read_project_settings(path: &Path) -> Result<String> {
    let path = settings_path(path)?;
    std::fs::read_to_string(&path).map_err(|source| ManifestError::Read { path, source })
}

fn version_in(text: &str, path: &Path) -> Result<Version> {
    let raw = BUNDLE_VERSION
        .read(text)
        .ok_or_else(|| ManifestError::ProjectVersionParse {
            path: path.to_path_buf(),
        })?;

    parse_document_version(raw).map_err(|source| ManifestError::InvalidVersion {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// Returns `ManifestError::ProjectVersionParse` if `bundleVersion` is absent
/// or empty, or `ManifestError::InvalidVersion` if it is not a version.
pub fn read_project_version(path: &Path) -> Result<Version> {
    let settings = settings_path(path)?;
    let text = read_project_settings(&settings)?;
    version_in(&text, &settings)
}

/// # Errors
///
/// Returns `ManifestError::ProjectProductNameParse` if `productName` is
/// absent or empty.
pub fn read_project_name(path: &Path) -> Result<String> {
    let settings = settings_path(path)?;
    let text = read_project_settings(&settings)?;

    PRODUCT_NAME
        .read(&text)
        .map(str::to_string)
        .ok_or(ManifestError::ProjectProductNameParse { path: settings })
}

/// Rewrites `bundleVersion` in place and reads it back.
///
/// # Errors
///
/// Returns `ManifestError::ProjectVersionParse` if the field is missing
/// (nothing is written), or `ManifestError::VerificationFailed` if the
/// rewritten document does not yield `version`.
pub fn write_project_version(path: &Path, version: &Version) -> Result<()> {
    let settings = settings_path(path)?;
    let text = read_project_settings(&settings)?;

    let rewritten = BUNDLE_VERSION
        .replace(&text, &version.to_string())
        .ok_or_else(|| ManifestError::ProjectVersionParse {
            path: settings.clone(),
        })?;

    std::fs::write(&settings, &rewritten).map_err(|source| ManifestError::Write {
        path: settings.clone(),
        source,
    })?;

    let written = read_project_settings(&settings)?;
    let actual = version_in(&written, &settings)?;
    if actual != *version {
        return Err(ManifestError::VerificationFailed {
            path: settings,
            expected: version.to_string(),
            actual: actual.to_string(),
        });
    }

    tracing::debug!(path = %settings.display(), %version, "wrote project version");
    Ok(())
}

/// Dependencies declared in `Packages/manifest.json`, in document order.
///
/// # Errors
///
/// Returns `ManifestError::MissingManifest` if the manifest does not exist,
/// or a parse error if it is not valid JSON.
pub fn read_project_dependencies(path: &Path) -> Result<IndexMap<String, String>> {
    let path = resolve_path(path, PROJECT_MANIFEST);
    if !path.is_file() {
        return Err(ManifestError::MissingManifest { path });
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
        path: path.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.clone(),
        source,
    })?;

    Ok(value
        .get("dependencies")
        .and_then(Value::as_object)
        .map(|deps| {
            deps.iter()
                .filter_map(|(name, range)| range.as_str().map(|r| (name.clone(), r.to_string())))
                .collect()
        })
        .unwrap_or_default())
}
