//! Flashcard generation service
//!
//! Validates the reader's selection, forwards it to the completion
//! provider with the fixed instruction, and extracts the structured
//! question/answer pair. One upstream call per request, no retries.

use std::sync::Arc;

use tracing::debug;

use super::provider::CompletionProvider;
use super::types::{AiError, Flashcard, FlashcardRequest};

/// Fixed system instruction for flashcard generation
const SYSTEM_PROMPT: &str = "Du bist ein Assistent zum Erstellen von Karteikarten. \
Erstelle aus dem markierten Text genau eine Lernkarte. \
Antworte ausschließlich mit einem JSON-Objekt der Form \
{\"question\": \"...\", \"answer\": \"...\"} ohne weiteren Text. \
Die Frage prüft das Verständnis des Textes, die Antwort ist kurz und präzise.";

pub struct FlashcardService {
    provider: Arc<dyn CompletionProvider>,
}

impl FlashcardService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate one flashcard for a reader selection.
    pub async fn generate(&self, request: &FlashcardRequest) -> Result<Flashcard, AiError> {
        if request.selected_text.is_empty() {
            return Err(AiError::MissingText);
        }
        if !self.provider.is_configured() {
            return Err(AiError::MissingApiKey);
        }

        let prompt = build_prompt(request);
        debug!("requesting flashcard completion ({} prompt chars)", prompt.len());

        let content = self.provider.complete(SYSTEM_PROMPT, &prompt).await?;
        if content.is_empty() {
            return Err(AiError::EmptyCompletion);
        }

        serde_json::from_str(&content).map_err(|_| AiError::ParseFailure)
    }
}

/// User prompt: context first when present, then the selection.
fn build_prompt(request: &FlashcardRequest) -> String {
    match request.context.as_deref().filter(|c| !c.is_empty()) {
        Some(context) => format!(
            "Kontext: {}\n\nMarkierter Text: {}",
            context, request.selected_text
        ),
        None => format!("Markierter Text: {}", request.selected_text),
    }
}
