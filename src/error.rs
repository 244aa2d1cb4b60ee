//! Error types for the Digitales Skript server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Backend(e) => {
                tracing::error!("Backend error: {}", e);
                match e {
                    BackendError::DocumentNotFound(id) => (
                        StatusCode::NOT_FOUND,
                        "not_found",
                        format!("Document not found: {}", id),
                    ),
                    BackendError::MissingConfig(msg) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "configuration_error",
                        msg.clone(),
                    ),
                    _ => (
                        StatusCode::BAD_GATEWAY,
                        "backend_error",
                        "Backend request failed".to_string(),
                    ),
                }
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "IO error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_backend_error_mapping() {
        let not_found = AppError::Backend(BackendError::DocumentNotFound(Uuid::new_v4()));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let config = AppError::Backend(BackendError::MissingConfig("SUPABASE_URL".into()));
        assert_eq!(
            config.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let upstream = AppError::Backend(BackendError::Status {
            status: 503,
            message: "unavailable".into(),
        });
        assert_eq!(upstream.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
