//! simcheck-gw library - Similarity Check Gateway
//!
//! Normalizes client submissions (multipart file or JSON text), relays them
//! to the external analysis engine, and renders match reports. Exposes the
//! router and state for integration testing.

pub mod api;
pub mod engine;
pub mod render;
pub mod upload;

pub use api::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use engine::EngineClient;
use render::ReportRenderer;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Client for the external analysis engine (read-only after startup)
    pub engine: EngineClient,
    /// Directory where uploads are spooled for the duration of one request
    pub uploads_dir: PathBuf,
    /// Match report renderer; owns the reusable chart handle
    pub renderer: Arc<Mutex<ReportRenderer>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(engine: EngineClient, uploads_dir: PathBuf) -> Self {
        Self {
            engine,
            uploads_dir,
            renderer: Arc::new(Mutex::new(ReportRenderer::new())),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // UI routes (HTML pages)
        .route("/", get(api::ui::serve_index))
        .route("/static/app.js", get(api::ui::serve_app_js))
        // API routes
        .route("/api/check", post(api::check::check))
        .route("/api/add-document", post(api::corpus::add_document))
        .route("/api/report", post(api::report::render_report))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
