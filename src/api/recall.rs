//! Recall submission endpoint (multipart audio upload)

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::db::recalls;
use crate::error::{ApiError, ApiResult};
use crate::recordings::RecordingStore;
use crate::AppState;

/// Response after saving a voice recording
#[derive(Debug, Serialize)]
pub struct RecallResponse {
    pub recall_id: Option<i64>,
    pub message: String,
    pub audio_filename: String,
}

/// Multipart fields collected from a recall submission
#[derive(Debug, Default)]
struct RecallForm {
    audio: Option<Vec<u8>>,
    audio_extension: Option<String>,
    target_word: Option<String>,
    marker_id: Option<String>,
    participant_id: Option<i64>,
    session_id: Option<i64>,
}

/// POST /recall
///
/// Called when the user records their pronunciation. The audio file is
/// always saved; the structured recall row is written only when a
/// participant id is present, mirroring the translate endpoint's policy of
/// retaining data for tracked participants only.
pub async fn submit_recall(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<RecallResponse>> {
    let form = read_form(multipart).await?;

    let audio = form
        .audio
        .ok_or_else(|| ApiError::BadRequest("Missing 'audio_file' field".to_string()))?;
    let target_word = form
        .target_word
        .ok_or_else(|| ApiError::BadRequest("Missing 'target_word' field".to_string()))?;
    let marker_id = form
        .marker_id
        .ok_or_else(|| ApiError::BadRequest("Missing 'marker_id' field".to_string()))?;
    let extension = form.audio_extension.unwrap_or_else(|| "m4a".to_string());

    let filename = RecordingStore::filename(
        form.participant_id,
        Utc::now(),
        &marker_id,
        &target_word,
        &extension,
    );

    // Step 1: write the audio file. A failure here aborts the call before
    // any database row exists.
    let stored_path = state.recordings.save(&filename, &audio).await?;

    // Step 2: log the attempt, gated on participant presence. The audio is
    // kept either way.
    let mut recall_id = None;
    if let Some(participant_id) = form.participant_id {
        let id = recalls::insert_recall(
            &state.db,
            form.session_id,
            participant_id,
            &marker_id,
            &target_word,
            &stored_path.to_string_lossy(),
        )
        .await?;
        recall_id = Some(id);
        info!("Recall #{} logged (participant {})", id, participant_id);
    }

    Ok(Json(RecallResponse {
        recall_id,
        message: "Voice recording saved.".to_string(),
        audio_filename: filename,
    }))
}

/// Drain the multipart stream into a [`RecallForm`]. Integer fields are
/// coerced with a 400 on failure; unknown fields are ignored.
async fn read_form(mut multipart: Multipart) -> Result<RecallForm, ApiError> {
    let mut form = RecallForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "audio_file" => {
                form.audio_extension = field
                    .file_name()
                    .and_then(|f| f.rsplit_once('.').map(|(_, ext)| ext.to_string()));
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read audio: {}", e)))?;
                form.audio = Some(bytes.to_vec());
            }
            "target_word" => form.target_word = Some(read_text(field, &name).await?),
            "marker_id" => form.marker_id = Some(read_text(field, &name).await?),
            "participant_id" => form.participant_id = Some(read_int(field, &name).await?),
            "session_id" => form.session_id = Some(read_int(field, &name).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read '{}': {}", name, e)))
}

async fn read_int(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<i64, ApiError> {
    let text = read_text(field, name).await?;
    text.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Field '{}' is not an integer: {}", name, text)))
}
