mod editor;
mod error;
mod field;
mod package;
mod paths;
mod project;

pub use editor::{EditorVersion, read_editor_version};
pub use error::ManifestError;
pub use field::LabeledField;
pub use package::PackageDocument;
pub use paths::{
    PACKAGE_MANIFEST, PROJECT_MANIFEST, PROJECT_SETTINGS, PROJECT_VERSION_FILE, resolve_path,
};
pub use project::{
    read_project_dependencies, read_project_name, read_project_settings, read_project_version,
    write_project_version,
};

pub type Result<T> = std::result::Result<T, ManifestError>;
