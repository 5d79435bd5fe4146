//! Error types for the fields crate

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when working with field definitions
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field name does not match `[a-z][a-z0-9_]*`
    #[error("invalid field name: {name}")]
    InvalidName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_display() {
        let err = FieldsError::InvalidName {
            name: "Bad Name".into(),
        };
        assert_eq!(err.to_string(), "invalid field name: Bad Name");
    }
}
