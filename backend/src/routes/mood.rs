//! Mood logging routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ReadingsService;
use crate::services::readings::LogMoodInput;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bp_guardian_shared::models::MoodLog;
use bp_guardian_shared::types::{ListQuery, LogMoodRequest, MoodLogResponse};

/// Create mood routes
pub fn mood_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_mood))
        .route("/", get(list_moods))
}

fn to_response(log: MoodLog) -> MoodLogResponse {
    MoodLogResponse {
        id: log.id,
        user_id: log.user_id,
        mood_level: log.mood_level,
        note: log.note,
        timestamp: log.timestamp,
    }
}

/// Log a mood entry
///
/// POST /api/v1/mood
async fn log_mood(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<LogMoodRequest>,
) -> ApiResult<(StatusCode, Json<MoodLogResponse>)> {
    let log = ReadingsService::log_mood(
        &state.db,
        auth_user.user_id,
        LogMoodInput {
            mood_level: req.mood_level,
            note: req.note,
            timestamp: req.timestamp,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(to_response(log))))
}

/// List recent mood entries, newest first
///
/// GET /api/v1/mood?limit=20
async fn list_moods(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<MoodLogResponse>>> {
    let logs = ReadingsService::recent_moods(&state.db, auth_user.user_id, query.limit).await?;
    Ok(Json(logs.into_iter().map(to_response).collect()))
}
