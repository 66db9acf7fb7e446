//! Usage record store - load/create/rollover of per-user usage rows

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::clock::Clock;
use crate::error::{GatewayError, Result};
use crate::usage::types::UserUsage;

/// SQLite-backed accessor for per-user usage records.
///
/// Owns record creation and the lazy day-rollover reset. Does not retry;
/// store failures propagate to the caller.
pub struct UsageStore {
    db: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl UsageStore {
    /// Create a new usage store
    pub fn new(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Initialize database tables
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id         TEXT PRIMARY KEY,
                daily_count     INTEGER NOT NULL DEFAULT 0,
                last_reset_date TEXT NOT NULL,
                is_premium      BOOLEAN NOT NULL DEFAULT 0,
                total_usage     INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Load the usage record for a user, creating it on first sight and
    /// applying the day-rollover reset when the stored day is stale.
    ///
    /// Performs at most one write per call (the insert or the reset).
    pub async fn load(&self, user_id: &str) -> Result<UserUsage> {
        let today = self.clock.today();

        match self.fetch(user_id).await? {
            None => {
                // ON CONFLICT DO NOTHING tolerates a concurrent first request
                // for the same user.
                sqlx::query(
                    r#"
                    INSERT INTO users (user_id, daily_count, last_reset_date, is_premium, total_usage)
                    VALUES (?, 0, ?, 0, 0)
                    ON CONFLICT(user_id) DO NOTHING
                    "#,
                )
                .bind(user_id)
                .bind(today.to_string())
                .execute(&self.db)
                .await?;

                match self.fetch(user_id).await? {
                    Some(usage) => Ok(usage),
                    None => Err(GatewayError::Store(sqlx::Error::RowNotFound)),
                }
            }
            Some(usage) if usage.needs_reset(today) => {
                // Conditional update: under concurrent requests the guard
                // makes the reset apply at most once per day transition.
                sqlx::query(
                    r#"
                    UPDATE users
                    SET daily_count = 0, last_reset_date = ?
                    WHERE user_id = ? AND last_reset_date != ?
                    "#,
                )
                .bind(today.to_string())
                .bind(user_id)
                .bind(today.to_string())
                .execute(&self.db)
                .await?;

                match self.fetch(user_id).await? {
                    Some(usage) => Ok(usage),
                    None => Err(GatewayError::Store(sqlx::Error::RowNotFound)),
                }
            }
            Some(usage) => Ok(usage),
        }
    }

    /// Set the premium flag on an existing user record
    pub async fn set_premium(&self, user_id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET is_premium = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(GatewayError::UserNotFound(user_id.to_string()));
        }

        Ok(())
    }

    /// Read a user row without creating or resetting it
    async fn fetch(&self, user_id: &str) -> Result<Option<UserUsage>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, daily_count, last_reset_date, is_premium, total_usage
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(|row| {
            let date_str: String = row.get("last_reset_date");
            let last_reset_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| GatewayError::Parse(format!("Invalid stored date '{}': {}", date_str, e)))?;

            Ok(UserUsage {
                user_id: row.get("user_id"),
                daily_count: row.get("daily_count"),
                last_reset_date,
                is_premium: row.get("is_premium"),
                total_usage: row.get("total_usage"),
            })
        })
        .transpose()
    }
}
