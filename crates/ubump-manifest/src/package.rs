use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use semver::Version;
use serde::Serialize;
use serde_json::{Map, Value};
use ubump_version::parse_document_version;

use crate::Result;
use crate::error::ManifestError;
use crate::paths::{PACKAGE_MANIFEST, resolve_path};

const DEFAULT_INDENT: &str = "\t";

/// A loaded `package.json`, kept as an ordered JSON object so that a
/// read-modify-write cycle preserves key order and indentation.
#[derive(Debug, Clone)]
pub struct PackageDocument {
    path: PathBuf,
    root: Map<String, Value>,
    indent: String,
    trailing_newline: bool,
}

impl PackageDocument {
    /// Loads the package at `path`, which may be the package directory or
    /// its `package.json`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MissingPackageSettings` if there is no
    /// `package.json`, or a read/parse error.
    pub fn load(path: &Path) -> Result<Self> {
        let path = resolve_path(path, PACKAGE_MANIFEST);
        if !path.is_file() {
            return Err(ManifestError::MissingPackageSettings { path });
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;

        Self::parse(path, &content)
    }

    /// # Errors
    ///
    /// Returns `ManifestError::Parse` for malformed JSON and
    /// `ManifestError::NotAnObject` when the top level is not an object.
    pub fn parse(path: PathBuf, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.clone(),
            source,
        })?;

        let Value::Object(root) = value else {
            return Err(ManifestError::NotAnObject { path });
        };

        Ok(Self {
            indent: detect_indent(content),
            trailing_newline: content.ends_with('\n'),
            path,
            root,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.root.get(key).and_then(Value::as_str)
    }

    /// The dotted identifier from the `name` field, e.g. `com.acme.tool`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::PackageNameParse` if `name` is absent.
    pub fn formal_name(&self) -> Result<&str> {
        self.string_field("name")
            .ok_or_else(|| ManifestError::PackageNameParse {
                path: self.path.clone(),
            })
    }

    /// Last dot-separated segment of the formal name, used for branch and
    /// tag names.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::PackageNameParse` if `name` is absent.
    pub fn unfriendly_name(&self) -> Result<&str> {
        let formal = self.formal_name()?;
        Ok(formal.rsplit('.').next().unwrap_or(formal))
    }

    /// # Errors
    ///
    /// Returns `ManifestError::PackageDisplayNameParse` if `displayName` is absent.
    pub fn display_name(&self) -> Result<&str> {
        self.string_field("displayName")
            .ok_or_else(|| ManifestError::PackageDisplayNameParse {
                path: self.path.clone(),
            })
    }

    /// # Errors
    ///
    /// Returns `ManifestError::PackageVersionParse` if `version` is absent,
    /// or `ManifestError::InvalidVersion` if it cannot be read as semver.
    pub fn version(&self) -> Result<Version> {
        let raw = self
            .string_field("version")
            .ok_or_else(|| ManifestError::PackageVersionParse {
                path: self.path.clone(),
            })?;

        parse_document_version(raw).map_err(|source| ManifestError::InvalidVersion {
            path: self.path.clone(),
            source,
        })
    }

    /// Declared dependencies in document order; empty when the package has
    /// no `dependencies` object.
    #[must_use]
    pub fn dependencies(&self) -> IndexMap<String, String> {
        self.root
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .filter_map(|(name, range)| {
                        range.as_str().map(|r| (name.clone(), r.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn environment_field(&self, key: &str) -> Option<&str> {
        self.string_field(key)
    }

    /// # Errors
    ///
    /// Returns `ManifestError::PackageVersionParse` if the document has no
    /// `version` field to replace.
    pub fn set_version(&mut self, version: &Version) -> Result<()> {
        let slot = self
            .root
            .get_mut("version")
            .ok_or_else(|| ManifestError::PackageVersionParse {
                path: self.path.clone(),
            })?;
        *slot = Value::String(version.to_string());
        Ok(())
    }

    /// Returns `true` if the existing entry changed. Names the package does
    /// not already declare are left alone.
    pub fn set_dependency(&mut self, name: &str, range: &str) -> bool {
        let Some(slot) = self
            .root
            .get_mut("dependencies")
            .and_then(Value::as_object_mut)
            .and_then(|deps| deps.get_mut(name))
        else {
            return false;
        };

        if slot.as_str() == Some(range) {
            return false;
        }
        *slot = Value::String(range.to_string());
        true
    }

    /// Returns `true` if the existing field changed. Fields the package does
    /// not already declare are left alone.
    pub fn set_environment_field(&mut self, key: &str, value: &str) -> bool {
        let Some(slot) = self.root.get_mut(key) else {
            return false;
        };

        if slot.as_str() == Some(value) {
            return false;
        }
        *slot = Value::String(value.to_string());
        true
    }

    /// # Errors
    ///
    /// Returns `ManifestError::Serialize` if the document cannot be encoded.
    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

        self.root
            .serialize(&mut serializer)
            .map_err(|source| ManifestError::Serialize {
                path: self.path.clone(),
                source,
            })?;

        let mut rendered = String::from_utf8_lossy(&buf).into_owned();
        if self.trailing_newline {
            rendered.push('\n');
        }
        Ok(rendered)
    }

    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded or written.
    pub fn save(&self) -> Result<()> {
        let rendered = self.render()?;

        std::fs::write(&self.path, rendered).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "wrote package manifest");
        Ok(())
    }
}

fn detect_indent(content: &str) -> String {
    content
        .lines()
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect::<String>()
        })
        .filter(|indent| !indent.is_empty())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}
