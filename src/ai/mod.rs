//! AI flashcard generation
//!
//! The proxy path between the reader and the completion API: request
//! validation, prompt construction, one upstream call, and strict
//! extraction of the question/answer pair.

pub mod provider;
mod service;
mod types;

pub use provider::{CompletionProvider, OpenAiProvider};
pub use service::FlashcardService;
pub use types::{AiError, Flashcard, FlashcardRequest};
