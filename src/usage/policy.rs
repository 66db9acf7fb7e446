//! Quota policy - pure allow/deny decision over a usage record

use crate::config::QuotaConfig;
use crate::usage::types::UserUsage;

/// Tiered daily-limit policy.
///
/// Limits are injected from configuration so the policy stays pure and
/// testable in isolation.
#[derive(Debug, Clone)]
pub struct QuotaPolicy {
    free_daily_limit: i64,
    premium_daily_limit: i64,
}

/// Outcome of a quota check
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// The daily limit that applied to this record's tier
    pub limit: i64,
    /// Tier-specific denial message, set only when denied
    pub reason: Option<String>,
}

impl QuotaPolicy {
    /// Create a policy with explicit limits
    pub fn new(free_daily_limit: i64, premium_daily_limit: i64) -> Self {
        Self {
            free_daily_limit,
            premium_daily_limit,
        }
    }

    /// Create a policy from configuration
    pub fn from_config(config: &QuotaConfig) -> Self {
        Self::new(config.free_daily_limit, config.premium_daily_limit)
    }

    /// The daily limit for the record's tier
    pub fn limit_for(&self, usage: &UserUsage) -> i64 {
        if usage.is_premium {
            self.premium_daily_limit
        } else {
            self.free_daily_limit
        }
    }

    /// Decide whether another request is allowed for this record.
    ///
    /// Deterministic and side-effect free.
    pub fn evaluate(&self, usage: &UserUsage) -> QuotaDecision {
        let limit = self.limit_for(usage);

        if usage.daily_count >= limit {
            let reason = if usage.is_premium {
                format!(
                    "Daily limit of {} requests reached. Please try again tomorrow.",
                    limit
                )
            } else {
                format!(
                    "Free daily limit of {} requests reached. Upgrade to premium for a higher limit.",
                    limit
                )
            };
            QuotaDecision {
                allowed: false,
                limit,
                reason: Some(reason),
            }
        } else {
            QuotaDecision {
                allowed: true,
                limit,
                reason: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn usage(daily_count: i64, is_premium: bool) -> UserUsage {
        UserUsage {
            user_id: "test".to_string(),
            daily_count,
            last_reset_date: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
            is_premium,
            total_usage: daily_count,
        }
    }

    #[test]
    fn test_free_tier_boundaries() {
        let policy = QuotaPolicy::new(30, 150);

        assert!(policy.evaluate(&usage(0, false)).allowed);
        assert!(policy.evaluate(&usage(29, false)).allowed);
        assert!(!policy.evaluate(&usage(30, false)).allowed);
        assert!(!policy.evaluate(&usage(31, false)).allowed);
    }

    #[test]
    fn test_premium_tier_boundaries() {
        let policy = QuotaPolicy::new(30, 150);

        assert!(policy.evaluate(&usage(30, true)).allowed);
        assert!(policy.evaluate(&usage(149, true)).allowed);
        assert!(!policy.evaluate(&usage(150, true)).allowed);
    }

    #[test]
    fn test_denial_reason_names_the_limit() {
        let policy = QuotaPolicy::new(30, 150);

        let free = policy.evaluate(&usage(30, false));
        assert_eq!(free.limit, 30);
        let reason = free.reason.unwrap();
        assert!(reason.contains("30"));
        assert!(reason.contains("premium"));

        let premium = policy.evaluate(&usage(150, true));
        assert_eq!(premium.limit, 150);
        assert!(premium.reason.unwrap().contains("150"));
    }

    #[test]
    fn test_allowed_decision_has_no_reason() {
        let policy = QuotaPolicy::new(30, 150);
        let decision = policy.evaluate(&usage(5, false));
        assert!(decision.allowed);
        assert_eq!(decision.limit, 30);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn test_limit_for_respects_tier() {
        let policy = QuotaPolicy::new(30, 150);
        assert_eq!(policy.limit_for(&usage(0, false)), 30);
        assert_eq!(policy.limit_for(&usage(0, true)), 150);
    }
}
