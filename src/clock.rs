//! Calendar-day source for quota rollover detection

use chrono::{NaiveDate, Utc};

/// Produces the current calendar day.
///
/// Injected into the usage store so day rollover can be driven
/// deterministically in tests instead of waiting for midnight.
pub trait Clock: Send + Sync {
    /// Current calendar day (date without time)
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation using the UTC calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_current_utc_day() {
        let clock = SystemClock;
        assert_eq!(clock.today(), Utc::now().date_naive());
    }
}
