//! Flashcard proxy types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for flashcard generation
#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardRequest {
    /// The reader's text selection. An absent field counts as empty.
    #[serde(rename = "selectedText", default)]
    pub selected_text: String,
    /// Surrounding text for better questions
    #[serde(default)]
    pub context: Option<String>,
}

/// A generated question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// Errors produced by the flashcard proxy.
///
/// The display strings are returned to the caller verbatim, so they
/// are short and German.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AiError {
    #[error("Ausgewählter Text ist erforderlich")]
    MissingText,

    #[error("OPENAI_API_KEY ist nicht konfiguriert")]
    MissingApiKey,

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Keine Antwort von der KI erhalten")]
    EmptyCompletion,

    #[error("Fehler beim Parsen der KI-Antwort")]
    ParseFailure,

    #[error("{0}")]
    Unexpected(String),
}

impl AiError {
    /// Fallback for unexpected failures that carry no message
    pub const FALLBACK_MESSAGE: &'static str = "Ein unerwarteter Fehler ist aufgetreten";

    /// Upstream failure with the extracted message, or the generic
    /// "API Fehler: {status}" when the upstream body gave none.
    pub fn upstream(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("API Fehler: {}", status));
        Self::Upstream { status, message }
    }

    /// Unexpected failure, substituting the generic fallback for an
    /// empty message.
    pub fn unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::Unexpected(Self::FALLBACK_MESSAGE.to_string())
        } else {
            Self::Unexpected(message)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingText => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body shape of the proxy endpoint
#[derive(Serialize)]
struct AiErrorBody {
    error: String,
}

impl IntoResponse for AiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("flashcard generation failed: {}", self);
        }
        (status, Json(AiErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_selected_text_defaults_to_empty() {
        let request: FlashcardRequest = serde_json::from_str("{}").unwrap();
        assert!(request.selected_text.is_empty());
        assert!(request.context.is_none());
    }

    #[test]
    fn test_upstream_message_fallback() {
        let err = AiError::upstream(429, None);
        assert_eq!(err.to_string(), "API Fehler: 429");

        let err = AiError::upstream(503, Some("Rate limit erreicht".to_string()));
        assert_eq!(err.to_string(), "Rate limit erreicht");
    }

    #[test]
    fn test_unexpected_message_fallback() {
        assert_eq!(
            AiError::unexpected("").to_string(),
            AiError::FALLBACK_MESSAGE
        );
        assert_eq!(AiError::unexpected("kaputt").to_string(), "kaputt");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AiError::MissingText.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AiError::MissingApiKey.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AiError::upstream(429, None).status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AiError::EmptyCompletion.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AiError::ParseFailure.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_upstream_status_maps_to_bad_gateway() {
        assert_eq!(
            AiError::upstream(42, None).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
