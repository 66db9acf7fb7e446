//! Usage ledger - atomic post-success counter increments

use sqlx::SqlitePool;

use crate::error::Result;

/// Applies the post-success increment to a user's usage counters.
///
/// The increment happens in a single SQL statement so concurrent requests
/// for the same user never lose updates.
pub struct UsageLedger {
    db: SqlitePool,
}

impl UsageLedger {
    /// Create a new ledger
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Increment both the daily and lifetime counters by one.
    ///
    /// Must be called only after the gated upstream call succeeded. Does
    /// not check rollover; the caller is expected to have obtained a
    /// same-day view via `UsageStore::load` in the same request.
    pub async fn increment(&self, user_id: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET daily_count = daily_count + 1, total_usage = total_usage + 1
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::usage::store::UsageStore;
    use std::sync::Arc;

    async fn setup() -> (UsageStore, UsageLedger) {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = UsageStore::new(pool.clone(), Arc::new(SystemClock));
        store.init_db().await.unwrap();
        (store, UsageLedger::new(pool))
    }

    #[tokio::test]
    async fn test_increment_bumps_both_counters() {
        let (store, ledger) = setup().await;

        store.load("alice").await.unwrap();
        ledger.increment("alice").await.unwrap();
        ledger.increment("alice").await.unwrap();

        let usage = store.load("alice").await.unwrap();
        assert_eq!(usage.daily_count, 2);
        assert_eq!(usage.total_usage, 2);
    }

    #[tokio::test]
    async fn test_increment_unknown_user_is_a_noop() {
        let (store, ledger) = setup().await;

        ledger.increment("ghost").await.unwrap();

        // No row was created by the increment.
        let usage = store.load("ghost").await.unwrap();
        assert_eq!(usage.daily_count, 0);
        assert_eq!(usage.total_usage, 0);
    }
}
