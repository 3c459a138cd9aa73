//! Badge routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::BadgeService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use bp_guardian_shared::types::BadgeReport;
use chrono::Utc;

/// Create badge routes
pub fn badge_routes() -> Router<AppState> {
    Router::new().route("/", get(list_badges))
}

/// Evaluate badge conditions and list the user's badge status
///
/// GET /api/v1/badges
///
/// Awards any newly earned badges as a side effect; the response marks
/// them in `newly_awarded`.
async fn list_badges(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<BadgeReport>> {
    let now = Utc::now();
    let today = now.date_naive();
    let report = BadgeService::evaluate_and_award(&state.db, auth_user.user_id, today, now).await?;
    Ok(Json(report))
}
