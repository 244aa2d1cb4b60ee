//! Annotation export routes
//!
//! Endpoints for rendering a document's annotations as markdown: a
//! download response for the reader, a server-side archive, and the
//! palette listing the reader builds its color picker from.

use std::path::Path as FilePath;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::colors::{self, ColorDescriptor};
use crate::error::Result;
use crate::export::{self, ExportOptions, Highlight, Note, Section};
use crate::state::AppState;

/// Create the export router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:document_id", get(download_export))
        .route("/:document_id/archive", post(archive_export))
}

/// Create the palette router
pub fn colors_router() -> Router<AppState> {
    Router::new().route("/", get(list_colors))
}

/// GET /api/v1/export/{document_id}?highlights=..&notes=..&review_only=..
///
/// Renders the export and delivers it as a markdown attachment.
async fn download_export(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Query(options): Query<ExportOptions>,
) -> Result<Response> {
    let (title, markdown) = render_export(&state, document_id, options).await?;
    let filename = format!("{}.md", export::sanitize_filename(&title));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export::EXPORT_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(&filename)),
        ],
        markdown,
    )
        .into_response())
}

/// Response for a server-side archive run
#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub filename: String,
    pub path: String,
    pub bytes: usize,
}

/// POST /api/v1/export/{document_id}/archive
///
/// Renders the export and saves it under the configured export
/// directory instead of streaming it back.
async fn archive_export(
    State(state): State<AppState>,
    Path(document_id): Path<Uuid>,
    Query(options): Query<ExportOptions>,
) -> Result<Json<ArchiveResponse>> {
    let (title, markdown) = render_export(&state, document_id, options).await?;

    let export_dir = state.config().server.export_dir.clone();
    let path = export::save(&markdown, &title, FilePath::new(&export_dir))?;
    tracing::info!("archived export for {} at {}", document_id, path.display());

    Ok(Json(ArchiveResponse {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.to_string_lossy().into_owned(),
        bytes: markdown.len(),
    }))
}

/// Fetch the snapshot and run the formatter.
async fn render_export(
    state: &AppState,
    document_id: Uuid,
    options: ExportOptions,
) -> Result<(String, String)> {
    let backend = state.backend();

    let (title, sections, highlights, notes): (String, Vec<Section>, Vec<Highlight>, Vec<Note>) =
        futures::future::try_join4(
            backend.fetch_document_title(document_id),
            backend.fetch_sections(document_id),
            backend.fetch_highlights(document_id),
            backend.fetch_notes(document_id),
        )
        .await?;

    let markdown = export::export_markdown(&title, &sections, &highlights, &notes, options);
    Ok((title, markdown))
}

/// Content-Disposition for an attachment, with the RFC 5987 encoded
/// variant for non-ASCII names.
fn attachment_disposition(filename: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        filename,
        urlencoding::encode(filename)
    )
}

/// Palette listing response
#[derive(Debug, Serialize)]
pub struct PaletteResponse {
    pub colors: &'static [ColorDescriptor],
}

/// GET /api/v1/colors
async fn list_colors() -> Json<PaletteResponse> {
    Json(PaletteResponse {
        colors: colors::PALETTE,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum_test::TestServer;
    use serde_json::json;

    use super::*;
    use crate::ai::provider::MockProvider;
    use crate::backend::BackendClient;
    use crate::config::Config;

    #[test]
    fn test_attachment_disposition_encodes_utf8_names() {
        let header = attachment_disposition("Maß.md");
        assert!(header.starts_with("attachment; filename=\"Maß.md\""));
        assert!(header.ends_with("filename*=UTF-8''Ma%C3%9F.md"));
    }

    /// Serve canned backend rows on a local port.
    async fn mock_backend(section_id: Uuid) -> String {
        use axum::routing::get;

        let documents = json!([{ "title": "Analysis I" }]);
        let sections = json!([{
            "id": section_id,
            "title": "Grenzwerte",
            "page_start": 5,
            "page_end": 8
        }]);
        let highlights = json!([{
            "id": Uuid::new_v4(),
            "section_id": section_id,
            "text": "Jede konvergente Folge ist beschränkt.",
            "color": "blue",
            "review_flag": true
        }]);
        let notes = json!([{
            "id": Uuid::new_v4(),
            "section_id": section_id,
            "content": "Gilt auch im Vollständigen.",
            "created_at": "2026-08-04T09:00:00Z"
        }]);

        let app = Router::new()
            .route("/rest/v1/documents", get(move || async move { Json(documents.clone()) }))
            .route("/rest/v1/sections", get(move || async move { Json(sections.clone()) }))
            .route("/rest/v1/highlights", get(move || async move { Json(highlights.clone()) }))
            .route("/rest/v1/notes", get(move || async move { Json(notes.clone()) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    async fn test_server(backend_url: String, config: Config) -> TestServer {
        let backend: &'static BackendClient =
            Box::leak(Box::new(BackendClient::new(backend_url, "test-key")));
        let state = AppState::new(config, backend, Arc::new(MockProvider::replying("{}")));
        let app = Router::new()
            .nest("/api/v1/export", router())
            .nest("/api/v1/colors", colors_router())
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_download_export_end_to_end() {
        let document_id = Uuid::new_v4();
        let section_id = Uuid::new_v4();
        let backend_url = mock_backend(section_id).await;
        let server = test_server(backend_url, Config::default()).await;

        let response = server
            .get(&format!("/api/v1/export/{}", document_id))
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(
            response.header("content-type"),
            "text/markdown; charset=utf-8"
        );
        assert!(response
            .header("content-disposition")
            .to_str()
            .unwrap()
            .contains("Analysis_I.md"));

        let markdown = response.text();
        assert!(markdown.starts_with("# Analysis I\n"));
        assert!(markdown.contains("## Grenzwerte"));
        assert!(markdown.contains("*Seite 5 - 8*"));
        assert!(markdown.contains("> **Blau [Wiederholung]**"));
        assert!(markdown.contains("Gilt auch im Vollständigen."));
    }

    #[tokio::test]
    async fn test_review_only_query_drops_notes() {
        let document_id = Uuid::new_v4();
        let section_id = Uuid::new_v4();
        let backend_url = mock_backend(section_id).await;
        let server = test_server(backend_url, Config::default()).await;

        let response = server
            .get(&format!("/api/v1/export/{}", document_id))
            .add_query_param("review_only", "true")
            .await;

        response.assert_status(StatusCode::OK);
        let markdown = response.text();
        assert!(markdown.contains("> **Blau [Wiederholung]**"));
        assert!(!markdown.contains("### Notizen"));
    }

    #[tokio::test]
    async fn test_archive_export_writes_file() {
        let document_id = Uuid::new_v4();
        let section_id = Uuid::new_v4();
        let backend_url = mock_backend(section_id).await;

        let export_dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.server.export_dir = export_dir.path().to_string_lossy().into_owned();
        let server = test_server(backend_url, config).await;

        let response = server
            .post(&format!("/api/v1/export/{}/archive", document_id))
            .await;

        response.assert_status(StatusCode::OK);
        let archive: serde_json::Value = response.json();
        assert_eq!(archive["filename"], "Analysis_I.md");

        let content =
            std::fs::read_to_string(export_dir.path().join("Analysis_I.md")).unwrap();
        assert!(content.starts_with("# Analysis I\n"));
    }

    #[tokio::test]
    async fn test_list_colors() {
        let document_id = Uuid::new_v4();
        let backend_url = mock_backend(Uuid::new_v4()).await;
        let server = test_server(backend_url, Config::default()).await;

        let response = server.get("/api/v1/colors").await;
        response.assert_status(StatusCode::OK);

        let palette: serde_json::Value = response.json();
        let colors = palette["colors"].as_array().unwrap();
        assert_eq!(colors.len(), 6);
        assert_eq!(colors[0]["value"], "yellow");
        assert_eq!(colors[0]["label"], "Gelb");
    }
}
