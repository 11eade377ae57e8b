//! Database access layer
//!
//! SQLite, append-only: each entity supports a single-statement insert and
//! the read queries used by the export facility. No updates, no deletes.
//!
//! Referential links are by identifier only. The schema declares foreign
//! keys for documentation, but enforcement stays off (sqlx turns it on per
//! connection by default): a recall may name a session or participant that
//! was never logged, and the row is kept as submitted.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

pub mod models;
pub mod participants;
pub mod recalls;
pub mod sessions;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let newly_created = !db_path.exists();

    // Connect options apply to every pooled connection. WAL allows
    // concurrent readers with one writer; each insert here is a
    // self-contained transaction, so this is all the coordination needed.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(false)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_tables(&pool).await?;

    Ok(pool)
}

/// Create experiment tables (idempotent - safe to call multiple times)
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_participants_table(pool).await?;
    create_translation_sessions_table(pool).await?;
    create_recall_attempts_table(pool).await?;
    Ok(())
}

/// Participants table - demographics and condition assignment
async fn create_participants_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participants (
            participant_id INTEGER PRIMARY KEY AUTOINCREMENT,
            age INTEGER,
            gender TEXT,
            nationality TEXT,
            language_experience TEXT,
            condition_order TEXT,
            created_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Translation sessions - one row per QR scan by a tracked participant
async fn create_translation_sessions_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS translation_sessions (
            session_id INTEGER PRIMARY KEY AUTOINCREMENT,
            participant_id INTEGER,
            marker_id TEXT,
            object_name TEXT,
            target_word TEXT,
            modality TEXT,
            phase TEXT,
            timestamp TEXT,
            FOREIGN KEY (participant_id) REFERENCES participants(participant_id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Recall attempts - voice recordings submitted by participants
async fn create_recall_attempts_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recall_attempts (
            recall_id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id INTEGER,
            participant_id INTEGER,
            marker_id TEXT,
            target_word TEXT,
            audio_file_path TEXT,
            timestamp TEXT,
            FOREIGN KEY (session_id) REFERENCES translation_sessions(session_id),
            FOREIGN KEY (participant_id) REFERENCES participants(participant_id)
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    use std::str::FromStr;

    // Single connection: each in-memory SQLite connection is its own database
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Should parse in-memory URL")
        .foreign_keys(false);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Should open in-memory database");
    create_tables(&pool).await.expect("Should create tables");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_tables_idempotent() {
        let pool = memory_pool().await;
        // Second call must not fail
        create_tables(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
             ('participants', 'translation_sessions', 'recall_attempts')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_init_database_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("experiment_data.db");
        let pool = init_database(&db_path).await.unwrap();
        assert!(db_path.exists());
        drop(pool);
    }

    #[tokio::test]
    async fn test_dangling_references_insert() {
        // Links are by identifier only: rows naming a session or participant
        // that was never logged must still insert.
        let tmp = tempfile::tempdir().unwrap();
        let pool = init_database(&tmp.path().join("experiment_data.db"))
            .await
            .unwrap();

        let sid = super::sessions::insert_session(
            &pool,
            42,
            "CUP_ID_1",
            "cup",
            "cupă",
            crate::vocabulary::Modality::ArTextAudio,
            crate::vocabulary::Phase::Experiment,
        )
        .await
        .unwrap();
        assert_eq!(sid, 1);

        let rid = super::recalls::insert_recall(&pool, Some(99), 42, "CUP_ID_1", "cupă", "a.m4a")
            .await
            .unwrap();
        assert_eq!(rid, 1);
    }
}
