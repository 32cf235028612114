//! Unified error handling for the admin API.
//!
//! Handlers return [`AppError`]; its `IntoResponse` impl maps the error
//! taxonomy onto HTTP statuses and a uniform JSON `{"message": ...}` body,
//! so every failure surfaces to the client the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{IdentityError, StorageError};

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request was well-formed but violates a business rule
    /// (duplicate email, last-admin delete, negative price).
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed request from the client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(RepositoryError),

    /// Object storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Identity provider operation failed.
    #[error("identity provider error: {0}")]
    Identity(#[from] IdentityError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // Constraint violations carry messages meant for the client.
            RepositoryError::Conflict(message) => Self::Validation(message),
            RepositoryError::NotFound => Self::NotFound("resource not found".to_owned()),
            other => Self::Database(other),
        }
    }
}

/// Uniform JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Storage(_) | Self::Identity(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(_) | Self::Identity(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Database(_) | Self::Internal(_) => "internal server error".to_owned(),
            Self::Storage(_) | Self::Identity(_) => "external service error".to_owned(),
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Unauthorized(message)
            | Self::BadRequest(message) => message,
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("duplicate".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("product 9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("no session".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_conflict_becomes_validation() {
        let err: AppError = RepositoryError::Conflict("admin email already exists".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_repository_not_found_becomes_not_found() {
        let err: AppError = RepositoryError::NotFound.into();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_display() {
        let err = AppError::NotFound("product 9".to_string());
        assert_eq!(err.to_string(), "not found: product 9");
    }
}
