//! arvocab - AR Vocabulary Learning Experiment backend
//!
//! Serves the mobile client of a vocabulary-learning study: translates
//! scanned QR markers into target words, stores voice recordings of
//! pronunciation attempts, and exports the collected data as CSV.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod recordings;
pub mod vocabulary;

use recordings::RecordingStore;
use vocabulary::Vocabulary;

/// Maximum accepted recall upload size (audio clips are a few hundred KB;
/// axum's 2 MB default is too tight for uncompressed submissions)
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Immutable vocabulary registry, built once at startup
    pub vocabulary: Arc<Vocabulary>,
    /// Filesystem store for voice recordings
    pub recordings: RecordingStore,
    /// Directory CSV exports are written to
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        vocabulary: Vocabulary,
        recordings: RecordingStore,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            vocabulary: Arc::new(vocabulary),
            recordings,
            export_dir,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::root_info))
        .route("/participant/register", post(api::register_participant))
        .route("/translate", post(api::translate))
        .route("/recall", post(api::submit_recall))
        .route("/export/csv", get(api::export_csv))
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Mobile client runs from arbitrary origins
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
