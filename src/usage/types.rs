use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-user usage record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUsage {
    /// Opaque user identity, primary key
    pub user_id: String,
    /// Successful requests since the last daily reset
    pub daily_count: i64,
    /// Calendar day the daily count was last zeroed
    pub last_reset_date: NaiveDate,
    /// Premium tier flag (selects the higher daily limit)
    pub is_premium: bool,
    /// Lifetime request counter, never reset
    pub total_usage: i64,
}

impl UserUsage {
    /// Create a fresh record for a first-seen user
    pub fn new(user_id: String, today: NaiveDate) -> Self {
        UserUsage {
            user_id,
            daily_count: 0,
            last_reset_date: today,
            is_premium: false,
            total_usage: 0,
        }
    }

    /// Whether the stored day no longer matches the current day
    pub fn needs_reset(&self, today: NaiveDate) -> bool {
        self.last_reset_date != today
    }

    /// Requests left today under the given limit
    pub fn remaining_today(&self, limit: i64) -> i64 {
        (limit - self.daily_count).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_record_defaults() {
        let usage = UserUsage::new("alice".to_string(), day("2026-08-23"));
        assert_eq!(usage.user_id, "alice");
        assert_eq!(usage.daily_count, 0);
        assert_eq!(usage.total_usage, 0);
        assert!(!usage.is_premium);
        assert_eq!(usage.last_reset_date, day("2026-08-23"));
    }

    #[test]
    fn test_needs_reset() {
        let usage = UserUsage::new("alice".to_string(), day("2026-08-22"));
        assert!(!usage.needs_reset(day("2026-08-22")));
        assert!(usage.needs_reset(day("2026-08-23")));
    }

    #[test]
    fn test_remaining_today() {
        let mut usage = UserUsage::new("alice".to_string(), day("2026-08-23"));
        usage.daily_count = 12;
        assert_eq!(usage.remaining_today(30), 18);

        usage.daily_count = 30;
        assert_eq!(usage.remaining_today(30), 0);

        // Concurrent requests can overshoot the limit slightly; remaining
        // never goes negative.
        usage.daily_count = 32;
        assert_eq!(usage.remaining_today(30), 0);
    }
}
