//! Error types for Unibridge.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 404
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            // 409
            Self::AlreadyExists(_) => StatusCode::CONFLICT,

            // 400
            Self::Validation(_) => StatusCode::BAD_REQUEST,

            // 500
            Self::Database(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }

    /// Map constraint violations from a write into domain errors.
    ///
    /// `what` names the row being written and appears in the message.
    pub fn from_write(err: sqlx::Error, what: &str) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Self::AlreadyExists(format!("{} already exists", what))
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                Self::Validation(format!("{} references a missing record", what))
            }
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

// Filesystem errors from creating the database directory
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::AlreadyExists("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            Error::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = Error::from_write(sqlx::Error::RowNotFound, "Course");
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
