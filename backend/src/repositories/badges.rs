//! Badge catalog and user-badge award repositories
//!
//! The badge catalog is global (not per user) and immutable once seeded.
//! Awards are written with a conditional insert so a concurrent evaluation
//! for the same user cannot produce a duplicate row; the schema's
//! UNIQUE(user_id, badge_id) constraint is the backstop.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Badge definition row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BadgeRecord {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// A badge the user has earned, joined with its definition
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EarnedBadgeRecord {
    pub code: String,
    pub earned_at: DateTime<Utc>,
}

/// Static badge definition used for seeding
#[derive(Debug, Clone, Copy)]
pub struct BadgeDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Badge catalog repository
pub struct BadgeRepository;

impl BadgeRepository {
    /// Insert any missing badge definitions. Idempotent: existing rows are
    /// left untouched, never updated.
    pub async fn seed(pool: &PgPool, definitions: &[BadgeDefinition]) -> Result<()> {
        for def in definitions {
            sqlx::query(
                r#"
                INSERT INTO badges (code, name, description)
                VALUES ($1, $2, $3)
                ON CONFLICT (code) DO NOTHING
                "#,
            )
            .bind(def.code)
            .bind(def.name)
            .bind(def.description)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    /// Get all badge definitions
    pub async fn get_all(pool: &PgPool) -> Result<Vec<BadgeRecord>> {
        let records = sqlx::query_as::<_, BadgeRecord>(
            r#"
            SELECT id, code, name, description
            FROM badges
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

/// User badge award repository
pub struct UserBadgeRepository;

impl UserBadgeRepository {
    /// Get the badges this user has earned, with their award timestamps
    pub async fn get_earned(pool: &PgPool, user_id: Uuid) -> Result<Vec<EarnedBadgeRecord>> {
        let records = sqlx::query_as::<_, EarnedBadgeRecord>(
            r#"
            SELECT b.code, ub.earned_at
            FROM user_badges ub
            JOIN badges b ON b.id = ub.badge_id
            WHERE ub.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Award a badge to a user if they do not hold it yet.
    ///
    /// Returns true when a row was actually inserted, false when the user
    /// already held the badge (including a lost race against a concurrent
    /// evaluation).
    pub async fn award_if_absent(
        pool: &PgPool,
        user_id: Uuid,
        code: &str,
        earned_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_badges (user_id, badge_id, earned_at)
            SELECT $1, b.id, $3
            FROM badges b
            WHERE b.code = $2
            ON CONFLICT (user_id, badge_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(code)
        .bind(earned_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
