//! Error types for the console API client

use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur talking to the console backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection failure
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401 — token invalid or expired
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// 403 — caller lacks access to the resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 404 — collection, field, or entry not found
    #[error("{0}")]
    NotFound(String),

    /// 409 — e.g. duplicate field name
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx response
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Malformed response payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extract a human-readable message from a JSON error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
pub(crate) fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = json.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_key_preferred() {
        let body = r#"{"message": "field name already exists", "code": 409}"#;
        assert_eq!(extract_error_message(body), "field name already exists");
    }

    #[test]
    fn error_key_fallback() {
        let body = r#"{"error": "not found"}"#;
        assert_eq!(extract_error_message(body), "not found");
    }

    #[test]
    fn raw_body_fallback() {
        assert_eq!(extract_error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn display_formats() {
        let err = ApiError::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
        assert_eq!(
            ApiError::Conflict("duplicate".into()).to_string(),
            "conflict: duplicate"
        );
    }
}
