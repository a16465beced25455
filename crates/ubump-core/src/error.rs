use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("bump type '{input}' is invalid (expected one of: {})", crate::BumpType::names().join(", "))]
    InvalidBumpType { input: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bump_type_lists_accepted_names() {
        let err = CoreError::InvalidBumpType {
            input: "No Change".to_string(),
        };

        let msg = err.to_string();

        assert!(msg.contains("'No Change'"));
        assert!(msg.contains("prerelease"));
        assert!(msg.contains("premajor"));
    }
}
