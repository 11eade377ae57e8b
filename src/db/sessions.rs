//! Translation session database operations

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::TranslationSession;
use crate::vocabulary::{Modality, Phase};

/// Log a translation session for a tracked participant.
///
/// All vocabulary fields come from the registry entry resolved by the
/// caller; they are never taken from client input, so the row matches the
/// registry as it stood at scan time.
pub async fn insert_session(
    pool: &SqlitePool,
    participant_id: i64,
    marker_id: &str,
    object_name: &str,
    target_word: &str,
    modality: Modality,
    phase: Phase,
) -> Result<i64, sqlx::Error> {
    let timestamp = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO translation_sessions
            (participant_id, marker_id, object_name, target_word, modality, phase, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(participant_id)
    .bind(marker_id)
    .bind(object_name)
    .bind(target_word)
    .bind(modality.as_str())
    .bind(phase.as_str())
    .bind(&timestamp)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All session rows, oldest first (export facility)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<TranslationSession>, sqlx::Error> {
    sqlx::query_as::<_, TranslationSession>(
        "SELECT * FROM translation_sessions ORDER BY session_id",
    )
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM translation_sessions")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{memory_pool, participants};

    #[tokio::test]
    async fn test_insert_copies_registry_fields() {
        let pool = memory_pool().await;
        let pid = participants::insert_participant(&pool, 25, "F", "RO", "none", "text_first")
            .await
            .unwrap();

        let sid = insert_session(
            &pool,
            pid,
            "CUP_ID_1",
            "cup",
            "cupă",
            Modality::ArTextAudio,
            Phase::Experiment,
        )
        .await
        .unwrap();
        assert_eq!(sid, 1);

        let rows = list_all(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participant_id, Some(pid));
        assert_eq!(rows[0].marker_id, "CUP_ID_1");
        assert_eq!(rows[0].object_name, "cup");
        assert_eq!(rows[0].target_word, "cupă");
        assert_eq!(rows[0].modality, "AR_TEXT_AUDIO");
        assert_eq!(rows[0].phase, "experiment");
    }
}
