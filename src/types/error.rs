//! Error types for Rehnuma

use hyper::StatusCode;
use serde::Serialize;

/// A single field-level validation failure, reported in 400 bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Field path, e.g. `type` or `courses[2].name`
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Main error type for Rehnuma operations
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DirectoryError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upload(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Field-level violations, when this error carries them
    pub fn violations(&self) -> Option<&[FieldViolation]> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

// Implement From conversions for common error types

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<hyper::Error> for DirectoryError {
    fn from(err: hyper::Error) -> Self {
        Self::Internal(format!("HTTP error: {}", err))
    }
}

impl From<mongodb::error::Error> for DirectoryError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upload(err.to_string())
    }
}

impl From<bson::ser::Error> for DirectoryError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Internal(format!("BSON error: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for DirectoryError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Unauthorized(format!("JWT error: {}", err))
    }
}

/// Result type alias for Rehnuma operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let v = DirectoryError::Validation(vec![FieldViolation::new("name", "required")]);
        assert_eq!(v.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(v.violations().unwrap().len(), 1);

        assert_eq!(
            DirectoryError::Conflict("already decided".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            DirectoryError::Database("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert!(DirectoryError::NotFound("x".into()).violations().is_none());
    }
}
