//! CSV export endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::export::{export_all, ExportCounts, EXPORT_FILES};
use crate::AppState;

/// Response listing the written artifacts and their row counts
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub message: String,
    pub files: Vec<String>,
    pub row_counts: ExportCounts,
}

/// GET /export/csv
///
/// Exports all experiment data to CSV files for offline analysis: one file
/// per table plus a combined (denormalized) view.
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<Json<ExportResponse>> {
    let row_counts = export_all(&state.db, &state.export_dir).await?;

    Ok(Json(ExportResponse {
        message: "Data exported successfully".to_string(),
        files: EXPORT_FILES.iter().map(|f| f.to_string()).collect(),
        row_counts,
    }))
}
