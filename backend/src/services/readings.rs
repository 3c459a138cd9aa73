//! Measurement logging service
//!
//! Validates and persists blood-pressure readings and mood logs. The
//! invariants enforced here (positive pressures, mood level in 1..=3) are
//! what lets the analysis engines assume well-formed records.

use crate::error::ApiError;
use crate::repositories::{
    BpReadingRecord, BpReadingRepository, CreateBpReading, CreateMoodLog, MoodLogRecord,
    MoodLogRepository,
};
use bp_guardian_shared::models::{BpReading, MoodLog};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Default number of entries returned by list endpoints
const DEFAULT_LIST_LIMIT: i64 = 20;
/// Upper bound for list endpoints
const MAX_LIST_LIMIT: i64 = 100;

/// Input for logging a blood-pressure reading
#[derive(Debug, Clone)]
pub struct LogBpInput {
    pub systolic: i32,
    pub diastolic: i32,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Input for logging a mood entry
#[derive(Debug, Clone)]
pub struct LogMoodInput {
    pub mood_level: i32,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Measurement logging service
pub struct ReadingsService;

impl ReadingsService {
    /// Log a blood-pressure reading
    pub async fn log_bp(
        pool: &PgPool,
        user_id: Uuid,
        input: LogBpInput,
    ) -> Result<BpReading, ApiError> {
        if input.systolic <= 0 || input.diastolic <= 0 {
            return Err(ApiError::Validation(
                "systolic and diastolic must be positive values".to_string(),
            ));
        }

        let record = BpReadingRepository::create(
            pool,
            CreateBpReading {
                user_id,
                systolic: input.systolic,
                diastolic: input.diastolic,
                timestamp: input.timestamp,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(bp_to_domain(record))
    }

    /// Get the most recent blood-pressure readings, newest first
    pub async fn recent_bp(
        pool: &PgPool,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<BpReading>, ApiError> {
        let limit = normalize_limit(limit);
        let records = BpReadingRepository::get_recent(pool, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(bp_to_domain).collect())
    }

    /// Log a mood entry
    pub async fn log_mood(
        pool: &PgPool,
        user_id: Uuid,
        input: LogMoodInput,
    ) -> Result<MoodLog, ApiError> {
        if !(1..=3).contains(&input.mood_level) {
            return Err(ApiError::Validation(
                "mood_level must be 1, 2, or 3".to_string(),
            ));
        }

        let record = MoodLogRepository::create(
            pool,
            CreateMoodLog {
                user_id,
                mood_level: input.mood_level,
                note: input.note,
                timestamp: input.timestamp,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(mood_to_domain(record))
    }

    /// Get the most recent mood logs, newest first
    pub async fn recent_moods(
        pool: &PgPool,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<MoodLog>, ApiError> {
        let limit = normalize_limit(limit);
        let records = MoodLogRepository::get_recent(pool, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(mood_to_domain).collect())
    }
}

fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

/// Convert database record to domain model
pub(crate) fn bp_to_domain(record: BpReadingRecord) -> BpReading {
    BpReading {
        id: record.id,
        user_id: record.user_id,
        systolic: record.systolic,
        diastolic: record.diastolic,
        timestamp: record.timestamp,
    }
}

/// Convert database record to domain model
pub(crate) fn mood_to_domain(record: MoodLogRecord) -> MoodLog {
    MoodLog {
        id: record.id,
        user_id: record.user_id,
        mood_level: record.mood_level,
        note: record.note,
        timestamp: record.timestamp,
    }
}
