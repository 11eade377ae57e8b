//! Marker translation endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::sessions;
use crate::error::{ApiError, ApiResult};
use crate::vocabulary::Modality;
use crate::AppState;

/// Request to translate a scanned QR marker
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub marker_id: String,
    pub participant_id: Option<i64>,
}

/// Response with the Romanian word and display modality
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub target_word: String,
    pub modality: Modality,
    pub object_name: String,
    pub session_id: Option<i64>,
}

/// POST /translate
///
/// Called when a QR code is scanned. Resolves the marker against the
/// vocabulary registry and, only when a participant id is supplied, logs a
/// translation session. Translation display still works for unregistered or
/// test scans; data is retained only for tracked participants.
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let entry = state.vocabulary.lookup(&request.marker_id).ok_or_else(|| {
        ApiError::NotFound(format!(
            "QR code '{}' not recognized. Valid codes: {:?}",
            request.marker_id,
            state.vocabulary.marker_ids()
        ))
    })?;

    let mut session_id = None;
    if let Some(participant_id) = request.participant_id {
        // Session fields are copied from the resolved registry entry, never
        // taken from the request.
        let id = sessions::insert_session(
            &state.db,
            participant_id,
            &request.marker_id,
            entry.object_name,
            entry.target_word,
            entry.modality,
            entry.phase,
        )
        .await?;
        session_id = Some(id);

        info!(
            "QR scanned: {} -> '{}' (participant {}, session {}, modality {})",
            request.marker_id,
            entry.target_word,
            participant_id,
            id,
            entry.modality.as_str()
        );
    }

    Ok(Json(TranslateResponse {
        target_word: entry.target_word.to_string(),
        modality: entry.modality,
        object_name: entry.object_name.to_string(),
        session_id,
    }))
}
