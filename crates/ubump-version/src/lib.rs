mod bump;
mod embedded;
mod error;
mod parse;

pub use bump::{DEFAULT_PREID, bump_version, bump_version_str, default_preid, prerelease_identifier};
pub use embedded::{find_embedded_version, rewrite_embedded_version};
pub use error::VersionError;
pub use parse::{coerce, is_valid, parse_document_version, parse_version};

pub type Result<T> = std::result::Result<T, VersionError>;
