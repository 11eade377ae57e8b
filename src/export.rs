//! Export facility: flattened CSV views of the experiment data
//!
//! Produces one CSV per table plus a denormalized join for offline analysis.
//! Reads the store independently of the request flow; nothing is mutated.

use std::path::Path;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::db::models::CombinedRow;
use crate::db::{participants, recalls, sessions};
use crate::error::ApiError;

/// The four export artifacts, in the order they are written
pub const EXPORT_FILES: [&str; 4] = [
    "export_participants.csv",
    "export_translation_sessions.csv",
    "export_recall_attempts.csv",
    "export_combined_data.csv",
];

/// Row counts per artifact, returned for verification
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExportCounts {
    pub participants: usize,
    pub sessions: usize,
    pub recordings: usize,
    pub combined_rows: usize,
}

/// Column headers per artifact, in struct field order. `csv` only emits a
/// header row when it serializes a record, so empty tables need them spelled
/// out to keep the artifacts header-stable for the analysis pipeline.
const PARTICIPANT_HEADERS: &[&str] = &[
    "participant_id",
    "age",
    "gender",
    "nationality",
    "language_experience",
    "condition_order",
    "created_at",
];
const SESSION_HEADERS: &[&str] = &[
    "session_id",
    "participant_id",
    "marker_id",
    "object_name",
    "target_word",
    "modality",
    "phase",
    "timestamp",
];
const RECALL_HEADERS: &[&str] = &[
    "recall_id",
    "session_id",
    "participant_id",
    "marker_id",
    "target_word",
    "audio_file_path",
    "timestamp",
];
const COMBINED_HEADERS: &[&str] = &[
    "participant_id",
    "age",
    "gender",
    "nationality",
    "language_experience",
    "condition_order",
    "session_id",
    "marker_id",
    "object_name",
    "target_word",
    "modality",
    "phase",
    "word_shown_at",
    "recall_id",
    "audio_file_path",
    "voice_recorded_at",
];

/// Export all data to CSV files under `export_dir`
pub async fn export_all(pool: &SqlitePool, export_dir: &Path) -> Result<ExportCounts, ApiError> {
    let participants = participants::list_all(pool).await?;
    write_csv(&export_dir.join(EXPORT_FILES[0]), PARTICIPANT_HEADERS, &participants)?;

    let sessions = sessions::list_all(pool).await?;
    write_csv(&export_dir.join(EXPORT_FILES[1]), SESSION_HEADERS, &sessions)?;

    let recalls = recalls::list_all(pool).await?;
    write_csv(&export_dir.join(EXPORT_FILES[2]), RECALL_HEADERS, &recalls)?;

    let combined = fetch_combined(pool).await?;
    write_csv(&export_dir.join(EXPORT_FILES[3]), COMBINED_HEADERS, &combined)?;

    let counts = ExportCounts {
        participants: participants.len(),
        sessions: sessions.len(),
        recordings: recalls.len(),
        combined_rows: combined.len(),
    };
    info!(
        "Exported {} participants, {} sessions, {} recordings, {} combined rows to {}",
        counts.participants,
        counts.sessions,
        counts.recordings,
        counts.combined_rows,
        export_dir.display()
    );
    Ok(counts)
}

/// Sessions left-joined to participants and recall attempts.
///
/// A session with no recall attempt yields one row with empty recall fields;
/// a session with several attempts yields one row per attempt.
pub async fn fetch_combined(pool: &SqlitePool) -> Result<Vec<CombinedRow>, sqlx::Error> {
    sqlx::query_as::<_, CombinedRow>(
        r#"
        SELECT
            p.participant_id,
            p.age,
            p.gender,
            p.nationality,
            p.language_experience,
            p.condition_order,
            ts.session_id,
            ts.marker_id,
            ts.object_name,
            ts.target_word,
            ts.modality,
            ts.phase,
            ts.timestamp AS word_shown_at,
            ra.recall_id,
            ra.audio_file_path,
            ra.timestamp AS voice_recorded_at
        FROM translation_sessions ts
        LEFT JOIN participants p ON ts.participant_id = p.participant_id
        LEFT JOIN recall_attempts ra ON ts.session_id = ra.session_id
        ORDER BY ts.participant_id, ts.timestamp
        "#,
    )
    .fetch_all(pool)
    .await
}

fn write_csv<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<(), ApiError> {
    let mut writer = csv::Writer::from_path(path).map_err(into_io)?;
    if rows.is_empty() {
        writer.write_record(headers).map_err(into_io)?;
    }
    for row in rows {
        writer.serialize(row).map_err(into_io)?;
    }
    writer.flush()?;
    Ok(())
}

fn into_io(err: csv::Error) -> ApiError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => ApiError::Io(io),
        other => ApiError::Internal(format!("CSV serialization failed: {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use crate::vocabulary::{Modality, Phase};

    async fn seed(pool: &SqlitePool) -> (i64, i64) {
        let pid = participants::insert_participant(pool, 25, "F", "RO", "none", "text_first")
            .await
            .unwrap();
        let sid = sessions::insert_session(
            pool,
            pid,
            "CUP_ID_1",
            "cup",
            "cupă",
            Modality::ArTextAudio,
            Phase::Experiment,
        )
        .await
        .unwrap();
        (pid, sid)
    }

    #[tokio::test]
    async fn test_export_writes_four_files_with_counts() {
        let pool = memory_pool().await;
        let (pid, sid) = seed(&pool).await;
        recalls::insert_recall(&pool, Some(sid), pid, "CUP_ID_1", "cupă", "path.m4a")
            .await
            .unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let counts = export_all(&pool, tmp.path()).await.unwrap();

        assert_eq!(counts.participants, 1);
        assert_eq!(counts.sessions, 1);
        assert_eq!(counts.recordings, 1);
        assert_eq!(counts.combined_rows, 1);
        for file in EXPORT_FILES {
            assert!(tmp.path().join(file).exists(), "missing {}", file);
        }
    }

    #[tokio::test]
    async fn test_export_empty_tables_still_write_headers() {
        let pool = memory_pool().await;
        let tmp = tempfile::tempdir().unwrap();
        let counts = export_all(&pool, tmp.path()).await.unwrap();
        assert_eq!(counts.participants, 0);
        assert_eq!(counts.combined_rows, 0);

        let participants_csv =
            std::fs::read_to_string(tmp.path().join(EXPORT_FILES[0])).unwrap();
        assert_eq!(
            participants_csv.lines().next(),
            Some(PARTICIPANT_HEADERS.join(",").as_str())
        );
        let combined_csv = std::fs::read_to_string(tmp.path().join(EXPORT_FILES[3])).unwrap();
        assert_eq!(
            combined_csv.lines().next(),
            Some(COMBINED_HEADERS.join(",").as_str())
        );
    }

    #[tokio::test]
    async fn test_combined_session_without_recall_appears_once() {
        let pool = memory_pool().await;
        seed(&pool).await;

        let combined = fetch_combined(&pool).await.unwrap();
        assert_eq!(combined.len(), 1);
        assert!(combined[0].recall_id.is_none());
        assert!(combined[0].voice_recorded_at.is_none());
        assert_eq!(combined[0].gender.as_deref(), Some("F"));
    }

    #[tokio::test]
    async fn test_combined_session_with_two_recalls_appears_twice() {
        let pool = memory_pool().await;
        let (pid, sid) = seed(&pool).await;
        for path in ["a.m4a", "b.m4a"] {
            recalls::insert_recall(&pool, Some(sid), pid, "CUP_ID_1", "cupă", path)
                .await
                .unwrap();
        }

        let combined = fetch_combined(&pool).await.unwrap();
        assert_eq!(combined.len(), 2);
        assert!(combined.iter().all(|r| r.session_id == sid));
    }

    #[tokio::test]
    async fn test_combined_row_count_arithmetic() {
        // combined == sum over sessions of max(1, attempts-for-that-session)
        let pool = memory_pool().await;
        let (pid, sid1) = seed(&pool).await;
        let sid2 = sessions::insert_session(
            &pool,
            pid,
            "APPLE_ID_2",
            "apple",
            "măr",
            Modality::TraditionalTextAudio,
            Phase::Experiment,
        )
        .await
        .unwrap();
        recalls::insert_recall(&pool, Some(sid1), pid, "CUP_ID_1", "cupă", "a.m4a")
            .await
            .unwrap();
        recalls::insert_recall(&pool, Some(sid1), pid, "CUP_ID_1", "cupă", "b.m4a")
            .await
            .unwrap();
        // sid2 has no attempts

        let combined = fetch_combined(&pool).await.unwrap();
        assert_eq!(combined.len(), 3); // max(1,2) + max(1,0)
        assert_eq!(combined.iter().filter(|r| r.session_id == sid2).count(), 1);
    }
}
