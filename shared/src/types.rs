//! API request and response types

use crate::analysis::{BpStatus, BpTrend, LoggingStatus, MoodCategory, RiskLevel, StressImpact};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for register/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

// ============================================================================
// Measurement Logging
// ============================================================================

/// Request to log a blood-pressure reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogBpRequest {
    pub systolic: i32,
    pub diastolic: i32,
    /// Defaults to the capture time when omitted
    pub timestamp: Option<DateTime<Utc>>,
}

/// Blood-pressure reading as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpReadingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub systolic: i32,
    pub diastolic: i32,
    pub timestamp: DateTime<Utc>,
}

/// Request to log a mood entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMoodRequest {
    pub mood_level: i32,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Mood log entry as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodLogResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood_level: i32,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for listing recent entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Recommendation
// ============================================================================

/// Snapshot of the most recent reading in the analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestBp {
    pub systolic: i32,
    pub diastolic: i32,
    pub timestamp: DateTime<Utc>,
}

/// Daily personalized recommendation produced by the rules engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_bp: Option<LatestBp>,
    pub bp_status: BpStatus,
    pub bp_risk_level: RiskLevel,
    pub bp_trend: BpTrend,
    pub mood_status: MoodCategory,
    pub stress_impact: StressImpact,
    pub logging_status: LoggingStatus,
    pub summary: String,
    pub recommendations: Vec<String>,
}

// ============================================================================
// Badges
// ============================================================================

/// One badge definition annotated with this user's earned state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeStatus {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}

/// Full badge status list plus the codes awarded during this evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeReport {
    pub badges: Vec<BadgeStatus>,
    pub newly_awarded: Vec<String>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Query parameters for the dashboard endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub range: Option<String>,
}

/// One raw BP series point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpPoint {
    pub timestamp: DateTime<Utc>,
    pub systolic: i32,
    pub diastolic: i32,
}

/// One raw mood series point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodPoint {
    pub timestamp: DateTime<Utc>,
    pub mood_level: i32,
    pub note: Option<String>,
}

/// Per-day BP averages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BpDaily {
    pub date: NaiveDate,
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
}

/// Per-day mood average with its category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodDaily {
    pub date: NaiveDate,
    pub avg_mood: f64,
    pub mood_category: MoodCategory,
}

/// Day carrying both BP and mood data, for correlation charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationPoint {
    pub date: NaiveDate,
    pub avg_systolic: f64,
    pub avg_diastolic: f64,
    pub avg_mood: f64,
    pub mood_category: MoodCategory,
}

/// Daily aggregates section of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub bp_daily: Vec<BpDaily>,
    pub mood_daily: Vec<MoodDaily>,
    pub correlation_points: Vec<CorrelationPoint>,
}

/// Dashboard response for one time range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub range: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub last_bp: Option<LatestBp>,
    pub highest_bp: Option<LatestBp>,
    pub lowest_bp: Option<LatestBp>,
    pub bp_series: Vec<BpPoint>,
    pub mood_series: Vec<MoodPoint>,
    pub daily_summary: DailySummary,
}
