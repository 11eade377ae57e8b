//! Database row models
//!
//! Field names match column names; these structs are read back whole by the
//! export facility and serialized straight to CSV.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Participant {
    pub participant_id: i64,
    pub age: i64,
    pub gender: String,
    pub nationality: String,
    pub language_experience: String,
    pub condition_order: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TranslationSession {
    pub session_id: i64,
    pub participant_id: Option<i64>,
    pub marker_id: String,
    pub object_name: String,
    pub target_word: String,
    pub modality: String,
    pub phase: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecallAttempt {
    pub recall_id: i64,
    pub session_id: Option<i64>,
    pub participant_id: Option<i64>,
    pub marker_id: String,
    pub target_word: String,
    pub audio_file_path: String,
    pub timestamp: String,
}

/// One row of the denormalized export: a session joined to its participant
/// and to zero or more recall attempts (one output row per attempt, or one
/// row with empty recall fields when there is none).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CombinedRow {
    pub participant_id: Option<i64>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub language_experience: Option<String>,
    pub condition_order: Option<String>,
    pub session_id: i64,
    pub marker_id: String,
    pub object_name: String,
    pub target_word: String,
    pub modality: String,
    pub phase: String,
    pub word_shown_at: String,
    pub recall_id: Option<i64>,
    pub audio_file_path: Option<String>,
    pub voice_recorded_at: Option<String>,
}
