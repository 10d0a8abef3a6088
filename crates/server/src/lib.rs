//! docsage HTTP API server (axum).
//!
//! Exposes the document-assistant endpoints (upload, ask, challenge,
//! evaluate, export, wordcloud) plus a health route, with permissive CORS,
//! a request body limit, and HTTP trace logging.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use docsage_assistant::Assistant;
use docsage_config::AppConfig;
use docsage_providers::GeminiProvider;
use docsage_session::InMemorySessionStore;
use state::{AppState, SharedState};

/// Build the application router around a prepared state.
pub fn app(state: SharedState, max_upload_bytes: usize) -> Router {
    routes::router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Wire up production state from configuration: Gemini provider plus the
/// in-memory session store.
pub fn build_state(config: &AppConfig) -> anyhow::Result<SharedState> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("no API key configured; set DOCSAGE_API_KEY"))?;

    let generator = GeminiProvider::with_timeout(
        api_key,
        Duration::from_secs(config.request_timeout_secs),
    )
    .with_base_url(&config.base_url)
    .with_model(&config.model);

    let store = Arc::new(InMemorySessionStore::new());
    let assistant = Assistant::new(store, Arc::new(generator));
    Ok(Arc::new(AppState::new(assistant)))
}

/// Start the HTTP server and serve until shutdown.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let app = app(state, config.server.max_upload_bytes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, model = %config.model, "docsage server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
