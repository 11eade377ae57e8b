//! Participant database operations

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::Participant;

/// Register a new participant, returning the assigned id
pub async fn insert_participant(
    pool: &SqlitePool,
    age: i64,
    gender: &str,
    nationality: &str,
    language_experience: &str,
    condition_order: &str,
) -> Result<i64, sqlx::Error> {
    let created_at = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO participants (age, gender, nationality, language_experience, condition_order, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(age)
    .bind(gender)
    .bind(nationality)
    .bind(language_experience)
    .bind(condition_order)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All participant rows, oldest first (export facility)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Participant>, sqlx::Error> {
    sqlx::query_as::<_, Participant>("SELECT * FROM participants ORDER BY participant_id")
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants")
        .fetch_one(pool)
        .await
}
