//! Application state management

use std::sync::Arc;

use crate::ai::{CompletionProvider, FlashcardService};
use crate::backend::BackendClient;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    backend: &'static BackendClient,
    flashcards: FlashcardService,
}

impl AppState {
    /// Create the application state.
    ///
    /// The completion provider is injected so route tests can swap in
    /// a fake; the backend handle comes from the process-wide client.
    pub fn new(
        config: Config,
        backend: &'static BackendClient,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                flashcards: FlashcardService::new(provider),
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the backend client
    pub fn backend(&self) -> &BackendClient {
        self.inner.backend
    }

    /// Get the flashcard service
    pub fn flashcards(&self) -> &FlashcardService {
        &self.inner.flashcards
    }
}
