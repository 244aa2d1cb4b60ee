//! AI flashcard proxy route

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::ai::{AiError, FlashcardRequest};
use crate::state::AppState;

/// Create the flashcard router
pub fn router() -> Router<AppState> {
    Router::new().route("/flashcard", post(generate_flashcard))
}

/// POST /api/v1/ai/flashcard
///
/// The body is parsed inside the handler so a malformed request
/// surfaces as the proxy's own error response instead of a framework
/// rejection; every code path yields exactly one response.
async fn generate_flashcard(State(state): State<AppState>, body: String) -> Response {
    let request: FlashcardRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return AiError::unexpected(format!("Ungültiger Anfragetext: {}", e)).into_response()
        }
    };

    match state.flashcards().generate(&request).await {
        Ok(card) => Json(card).into_response(),
        Err(e) => e.into_response(),
    }
}
