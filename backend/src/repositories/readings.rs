//! Blood-pressure and mood reading repositories
//!
//! Window queries return rows for one user in ascending timestamp order;
//! the analysis engines rely on that ordering.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Blood-pressure reading row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BpReadingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub systolic: i32,
    pub diastolic: i32,
    pub timestamp: DateTime<Utc>,
}

/// Input for creating a blood-pressure reading
#[derive(Debug, Clone)]
pub struct CreateBpReading {
    pub user_id: Uuid,
    pub systolic: i32,
    pub diastolic: i32,
    /// Falls back to the database clock when absent
    pub timestamp: Option<DateTime<Utc>>,
}

/// Mood log row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MoodLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood_level: i32,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Input for creating a mood log
#[derive(Debug, Clone)]
pub struct CreateMoodLog {
    pub user_id: Uuid,
    pub mood_level: i32,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Blood-pressure reading repository
pub struct BpReadingRepository;

impl BpReadingRepository {
    /// Create a new blood-pressure reading
    pub async fn create(pool: &PgPool, input: CreateBpReading) -> Result<BpReadingRecord> {
        let record = sqlx::query_as::<_, BpReadingRecord>(
            r#"
            INSERT INTO bp_readings (user_id, systolic, diastolic, timestamp)
            VALUES ($1, $2, $3, COALESCE($4, NOW()))
            RETURNING id, user_id, systolic, diastolic, timestamp
            "#,
        )
        .bind(input.user_id)
        .bind(input.systolic)
        .bind(input.diastolic)
        .bind(input.timestamp)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get readings for a user within a time window, oldest first
    pub async fn get_in_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BpReadingRecord>> {
        let records = sqlx::query_as::<_, BpReadingRecord>(
            r#"
            SELECT id, user_id, systolic, diastolic, timestamp
            FROM bp_readings
            WHERE user_id = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get the N most recent readings for a user, newest first
    pub async fn get_recent(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<BpReadingRecord>> {
        let records = sqlx::query_as::<_, BpReadingRecord>(
            r#"
            SELECT id, user_id, systolic, diastolic, timestamp
            FROM bp_readings
            WHERE user_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Check whether the user has logged any reading, ever
    pub async fn exists_any(pool: &PgPool, user_id: Uuid) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM bp_readings WHERE user_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists.0)
    }
}

/// Mood log repository
pub struct MoodLogRepository;

impl MoodLogRepository {
    /// Create a new mood log entry
    pub async fn create(pool: &PgPool, input: CreateMoodLog) -> Result<MoodLogRecord> {
        let record = sqlx::query_as::<_, MoodLogRecord>(
            r#"
            INSERT INTO mood_logs (user_id, mood_level, note, timestamp)
            VALUES ($1, $2, $3, COALESCE($4, NOW()))
            RETURNING id, user_id, mood_level, note, timestamp
            "#,
        )
        .bind(input.user_id)
        .bind(input.mood_level)
        .bind(&input.note)
        .bind(input.timestamp)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get mood logs for a user within a time window, oldest first
    pub async fn get_in_range(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodLogRecord>> {
        let records = sqlx::query_as::<_, MoodLogRecord>(
            r#"
            SELECT id, user_id, mood_level, note, timestamp
            FROM mood_logs
            WHERE user_id = $1 AND timestamp >= $2 AND timestamp <= $3
            ORDER BY timestamp ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get the N most recent mood logs for a user, newest first
    pub async fn get_recent(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MoodLogRecord>> {
        let records = sqlx::query_as::<_, MoodLogRecord>(
            r#"
            SELECT id, user_id, mood_level, note, timestamp
            FROM mood_logs
            WHERE user_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
