//! Recall attempt database operations

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::RecallAttempt;

/// Log a recall attempt. Called only when a participant id is present; the
/// session reference stays optional (a recall may arrive without a prior
/// session).
pub async fn insert_recall(
    pool: &SqlitePool,
    session_id: Option<i64>,
    participant_id: i64,
    marker_id: &str,
    target_word: &str,
    audio_file_path: &str,
) -> Result<i64, sqlx::Error> {
    let timestamp = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO recall_attempts
            (session_id, participant_id, marker_id, target_word, audio_file_path, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(session_id)
    .bind(participant_id)
    .bind(marker_id)
    .bind(target_word)
    .bind(audio_file_path)
    .bind(&timestamp)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All recall rows, oldest first (export facility)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<RecallAttempt>, sqlx::Error> {
    sqlx::query_as::<_, RecallAttempt>("SELECT * FROM recall_attempts ORDER BY recall_id")
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM recall_attempts")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn test_insert_with_and_without_session() {
        let pool = memory_pool().await;

        let with_session = insert_recall(
            &pool,
            Some(1),
            1,
            "CUP_ID_1",
            "cupă",
            "voice_recordings/P001_x_CUP_ID_1_cupă.m4a",
        )
        .await
        .unwrap();
        let without_session = insert_recall(
            &pool,
            None,
            1,
            "APPLE_ID_2",
            "măr",
            "voice_recordings/P001_y_APPLE_ID_2_măr.m4a",
        )
        .await
        .unwrap();

        assert_eq!(with_session, 1);
        assert_eq!(without_session, 2);

        let rows = list_all(&pool).await.unwrap();
        assert_eq!(rows[0].session_id, Some(1));
        assert_eq!(rows[1].session_id, None);
        assert_eq!(count(&pool).await.unwrap(), 2);
    }
}
