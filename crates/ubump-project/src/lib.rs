mod config;
mod error;
mod mapping;
mod project;

pub const CONFIG_FILE: &str = ".ubump.toml";

pub use config::{ReleaseConfig, load_release_config, parse_release_config};
pub use error::ProjectError;
pub use mapping::{FileMapping, PackageFiles, map_files_to_packages};
pub use project::{PackagePaths, UnityProject, discover_project};

pub type Result<T> = std::result::Result<T, ProjectError>;
