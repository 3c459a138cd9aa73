//! Authentication routes
//!
//! Registration and login. Password hashing runs on the blocking thread
//! pool so it never stalls the async runtime.

use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use bp_guardian_shared::types::{AuthResponse, LoginRequest, RegisterRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response =
        AuthService::register(&state.db, &req.email, &req.password, req.name.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::login(&state.db, &req.email, &req.password).await?;
    Ok(Json(response))
}
