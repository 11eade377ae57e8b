//! Participant registration endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::participants;
use crate::error::ApiResult;
use crate::AppState;

/// Counterbalancing assignment: which modality the participant sees first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOrder {
    TextFirst,
    AudioFirst,
}

impl ConditionOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOrder::TextFirst => "text_first",
            ConditionOrder::AudioFirst => "audio_first",
        }
    }
}

/// Request to register a new participant
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub age: i64,
    pub gender: String,
    pub nationality: String,
    pub language_experience: String,
    pub condition_order: ConditionOrder,
}

/// Response after participant registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub participant_id: i64,
    pub message: String,
}

/// POST /participant/register
///
/// Registers a new participant at the start of the experiment: demographics
/// and counterbalanced condition order. No validation beyond type coercion.
pub async fn register_participant(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let participant_id = participants::insert_participant(
        &state.db,
        request.age,
        &request.gender,
        &request.nationality,
        &request.language_experience,
        request.condition_order.as_str(),
    )
    .await?;

    info!(
        "Participant {} registered ({}yo, {}, condition order: {})",
        participant_id,
        request.age,
        request.gender,
        request.condition_order.as_str()
    );

    Ok(Json(RegisterResponse {
        participant_id,
        message: format!(
            "Participant {} registered. Ready to start experiment.",
            participant_id
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_order_wire_strings() {
        assert_eq!(ConditionOrder::TextFirst.as_str(), "text_first");
        assert_eq!(ConditionOrder::AudioFirst.as_str(), "audio_first");
        let parsed: ConditionOrder = serde_json::from_str("\"text_first\"").unwrap();
        assert_eq!(parsed, ConditionOrder::TextFirst);
    }

    #[test]
    fn test_unknown_condition_order_rejected() {
        let result: Result<ConditionOrder, _> = serde_json::from_str("\"random_first\"");
        assert!(result.is_err());
    }
}
