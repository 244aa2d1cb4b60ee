//! Digitales Skript Server
//!
//! Server-side core of the "Digitales Skript" document reader:
//! annotation export, AI flashcard generation, and the client for the
//! hosted backend the annotations live in.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod ai;
mod backend;
mod colors;
mod config;
mod error;
mod export;
mod routes;
mod state;
mod ui;

use ai::OpenAiProvider;
use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skript_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting Digitales Skript Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Completion endpoint: {}", config.ai.base_url);
    tracing::info!("Export directory: {}", config.server.export_dir);

    // Backend client (process-wide handle)
    let backend = backend::client()?;

    // Completion provider for the flashcard proxy
    let provider = Arc::new(OpenAiProvider::new(&config.ai));
    if config.ai.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, flashcard generation will be rejected");
    }

    // Create application state
    let app_state = AppState::new(config.clone(), backend, provider);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = axum::Router::new()
        .nest("/health", routes::health::router())
        .nest("/api/v1/health", routes::health::router())
        .nest("/api/v1/ai", routes::flashcards::router())
        .nest("/api/v1/export", routes::export::router())
        .nest("/api/v1/colors", routes::export::colors_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Digitales Skript Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
