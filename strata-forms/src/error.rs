//! Error types for the form engine

use thiserror::Error;

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;

/// A single validation problem, tagged to the field it belongs to.
///
/// Issues are values, not errors: they populate the per-field error slot in
/// the rendered form and block submission, but nothing is thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur in form sessions
#[derive(Debug, Error)]
pub enum FormError {
    /// Submission was attempted while validation issues are outstanding
    #[error("validation failed ({} issue(s))", .issues.len())]
    Validation { issues: Vec<FieldIssue> },

    /// The session has already closed
    #[error("form is not open")]
    NotOpen,

    /// No such field in this form
    #[error("unknown form field: {name}")]
    UnknownField { name: String },

    /// The attribute cannot be changed in edit mode
    #[error("{field} is immutable after creation")]
    ReadOnly { field: &'static str },

    /// The last option row cannot be removed
    #[error("at least one option row is required")]
    LastOptionRow,

    /// Option row index out of range
    #[error("no option row at index {index}")]
    InvalidOption { index: usize },
}

impl FormError {
    /// The validation issues carried by this error, if any.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Validation { issues } => issues,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_counts_issues() {
        let err = FormError::Validation {
            issues: vec![
                FieldIssue::new("title", "Required"),
                FieldIssue::new("meta", "Invalid JSON format"),
            ],
        };
        assert_eq!(err.to_string(), "validation failed (2 issue(s))");
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn field_issue_display() {
        let issue = FieldIssue::new("payload", "Must be a valid JSON array");
        assert_eq!(issue.to_string(), "payload: Must be a valid JSON array");
    }
}
