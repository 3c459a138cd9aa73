//! Dashboard route

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::DashboardService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use bp_guardian_shared::types::{DashboardQuery, DashboardResponse};
use chrono::Utc;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(summary))
}

/// Get the charting payload for one time range
///
/// GET /api/v1/dashboard?range=week|month|year
async fn summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let range = query.range.as_deref().unwrap_or("week");
    let response =
        DashboardService::summary(&state.db, auth_user.user_id, range, Utc::now()).await?;
    Ok(Json(response))
}
