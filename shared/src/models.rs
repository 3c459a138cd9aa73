//! Data models for the BP Guardian application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One blood-pressure measurement.
///
/// Invariant: systolic and diastolic are both positive (enforced at the
/// logging boundary, assumed by the analysis code).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpReading {
    pub id: Uuid,
    pub user_id: Uuid,
    pub systolic: i32,
    pub diastolic: i32,
    pub timestamp: DateTime<Utc>,
}

/// One self-reported mood entry on a 1-3 scale (1 = high stress, 3 = calm).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood_level: i32,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Achievement badge definition. Process-wide, not per-user; created once at
/// seed time and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Record of one user having earned one badge. At most one per
/// (user, badge) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBadge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub badge_id: Uuid,
    pub earned_at: DateTime<Utc>,
}
