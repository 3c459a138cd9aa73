//! Account registration and login

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::repositories::UserRepository;
use bp_guardian_shared::types::AuthResponse;
use sqlx::PgPool;

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new account. Email must be unique.
    pub async fn register(
        pool: &PgPool,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Validation(
                "email must be a valid email address".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(ApiError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        if UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .is_some()
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        // Hashing runs on the blocking pool
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &email, &password_hash, name)
            .await
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            message: "Registration successful".to_string(),
            user_id: user.id,
            email: user.email,
            name: user.name,
        })
    }

    /// Log in with email and password.
    pub async fn login(
        pool: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let email = email.trim().to_lowercase();

        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            user_id: user.id,
            email: user.email,
            name: user.name,
        })
    }
}
