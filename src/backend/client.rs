//! Hosted backend client
//!
//! The application's entities live in a hosted backend-as-a-service.
//! This module holds the process-wide client handle and the typed
//! snapshot reads the export pipeline works from.

use std::io::IsTerminal;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::export::{Highlight, Note, Section};

/// Environment variable naming the backend service URL
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable naming the backend public API key
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    MissingConfig(String),

    #[error("Backend request failed: {0}")]
    Request(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),
}

/// Handle to the hosted backend service
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

static CLIENT: OnceLock<BackendClient> = OnceLock::new();

/// Process-wide backend client.
///
/// The first caller constructs the handle from `SUPABASE_URL` and
/// `SUPABASE_ANON_KEY`; later callers get the cached instance. The
/// initialization race is benign: every caller would construct an
/// equivalent handle from the same configuration, so no lock beyond
/// the one-shot initializer is needed.
pub fn client() -> Result<&'static BackendClient, BackendError> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }
    let built = BackendClient::from_env()?;
    Ok(CLIENT.get_or_init(|| built))
}

fn missing_config(var: &str) -> BackendError {
    // Interactive shells get the .env hint; services get the bare fact.
    let message = if std::io::stdin().is_terminal() {
        format!("{} ist nicht gesetzt - bitte in der .env Datei ergänzen", var)
    } else {
        format!("{} ist nicht gesetzt", var)
    };
    BackendError::MissingConfig(message)
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn from_env() -> Result<Self, BackendError> {
        let base_url = std::env::var(URL_VAR).map_err(|_| missing_config(URL_VAR))?;
        let anon_key = std::env::var(KEY_VAR).map_err(|_| missing_config(KEY_VAR))?;
        Ok(Self::new(base_url, anon_key))
    }

    /// GET rows from one table of the backend's REST surface.
    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, BackendError> {
        let url = format!("{}/rest/v1/{}?{}", self.base_url, table, query);

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Title of a document
    pub async fn fetch_document_title(&self, document_id: Uuid) -> Result<String, BackendError> {
        let rows: Vec<DocumentRow> = self
            .get_rows("documents", &format!("select=title&id=eq.{}", document_id))
            .await?;

        rows.into_iter()
            .next()
            .map(|row| row.title)
            .ok_or(BackendError::DocumentNotFound(document_id))
    }

    /// Sections of a document, in reading order
    pub async fn fetch_sections(&self, document_id: Uuid) -> Result<Vec<Section>, BackendError> {
        self.get_rows(
            "sections",
            &format!("select=*&document_id=eq.{}&order=position.asc", document_id),
        )
        .await
    }

    /// Highlights of a document, in creation order
    pub async fn fetch_highlights(&self, document_id: Uuid) -> Result<Vec<Highlight>, BackendError> {
        self.get_rows(
            "highlights",
            &format!("select=*&document_id=eq.{}&order=created_at.asc", document_id),
        )
        .await
    }

    /// Notes of a document, in creation order
    pub async fn fetch_notes(&self, document_id: Uuid) -> Result<Vec<Note>, BackendError> {
        self.get_rows(
            "notes",
            &format!("select=*&document_id=eq.{}&order=created_at.asc", document_id),
        )
        .await
    }
}

#[derive(Debug, Deserialize)]
struct DocumentRow {
    title: String,
}
