//! Header-based user identity
//!
//! Prototype auth scheme: the frontend sends `X-User-Id: <uuid>` and the
//! extractor verifies that the user exists. The user id never reaches the
//! engines without passing through this check.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

/// Name of the identity header
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user extracted from the `X-User-Id` header
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;

        let user_id = Uuid::parse_str(header)
            .map_err(|_| ApiError::Unauthorized("Invalid X-User-Id header".to_string()))?;

        let exists = UserRepository::exists(app_state.db(), user_id)
            .await
            .map_err(ApiError::Internal)?;
        if !exists {
            return Err(ApiError::Unauthorized("User not found".to_string()));
        }

        Ok(AuthUser { user_id })
    }
}
