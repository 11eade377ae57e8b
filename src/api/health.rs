//! Health check and system info endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::vocabulary::{Modality, Phase};
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
///
/// Health check endpoint for monitoring.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "arvocab".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Experiment design summary shown on the root endpoint
#[derive(Debug, Serialize)]
pub struct ExperimentDesign {
    pub practice_items: usize,
    pub ar_items: usize,
    pub traditional_items: usize,
    pub total_qr_codes: usize,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: String,
    pub message: String,
    pub experiment_design: ExperimentDesign,
}

/// GET /
///
/// Health check and system info for the mobile client.
pub async fn root_info(State(state): State<AppState>) -> Json<RootResponse> {
    let vocab = &state.vocabulary;
    Json(RootResponse {
        status: "running".to_string(),
        message: "AR Vocabulary Learning Experiment Backend".to_string(),
        experiment_design: ExperimentDesign {
            practice_items: vocab.markers_by_phase(Phase::Practice).len(),
            ar_items: vocab
                .markers_by_modality(Modality::ArTextAudio)
                .iter()
                .filter(|id| {
                    vocab
                        .lookup(id)
                        .map(|e| e.phase == Phase::Experiment)
                        .unwrap_or(false)
                })
                .count(),
            traditional_items: vocab
                .markers_by_modality(Modality::TraditionalTextAudio)
                .iter()
                .filter(|id| {
                    vocab
                        .lookup(id)
                        .map(|e| e.phase == Phase::Experiment)
                        .unwrap_or(false)
                })
                .count(),
            total_qr_codes: vocab.len(),
        },
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
