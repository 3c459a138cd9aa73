//! Blood-pressure logging routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ReadingsService;
use crate::services::readings::LogBpInput;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bp_guardian_shared::models::BpReading;
use bp_guardian_shared::types::{BpReadingResponse, ListQuery, LogBpRequest};

/// Create blood-pressure routes
pub fn bp_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_reading))
        .route("/", get(list_readings))
}

fn to_response(reading: BpReading) -> BpReadingResponse {
    BpReadingResponse {
        id: reading.id,
        user_id: reading.user_id,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        timestamp: reading.timestamp,
    }
}

/// Log a blood-pressure reading
///
/// POST /api/v1/bp
async fn log_reading(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<LogBpRequest>,
) -> ApiResult<(StatusCode, Json<BpReadingResponse>)> {
    let reading = ReadingsService::log_bp(
        &state.db,
        auth_user.user_id,
        LogBpInput {
            systolic: req.systolic,
            diastolic: req.diastolic,
            timestamp: req.timestamp,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(to_response(reading))))
}

/// List recent blood-pressure readings, newest first
///
/// GET /api/v1/bp?limit=20
async fn list_readings(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<BpReadingResponse>>> {
    let readings = ReadingsService::recent_bp(&state.db, auth_user.user_id, query.limit).await?;
    Ok(Json(readings.into_iter().map(to_response).collect()))
}
