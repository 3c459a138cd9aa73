//! Daily recommendation route

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::RecommendationService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use bp_guardian_shared::types::Recommendation;
use chrono::Utc;

/// Create recommendation routes
pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/today", get(today))
}

/// Get the recommendation for today
///
/// GET /api/v1/recommendation/today
async fn today(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<Recommendation>> {
    // The clock is read once here; everything below is deterministic
    let today = Utc::now().date_naive();
    let recommendation = RecommendationService::get_daily(&state.db, auth_user.user_id, today).await?;
    Ok(Json(recommendation))
}
