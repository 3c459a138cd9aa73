//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User repository
pub struct UserRepository;

impl UserRepository {
    /// Create a new user account
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<UserRecord> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find a user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check whether a user with this id exists
    pub async fn exists(pool: &PgPool, user_id: Uuid) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists.0)
    }
}
