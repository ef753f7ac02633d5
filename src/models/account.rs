use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CaloriaError, Result};

/// Paid plan window, both ends inclusive of the calendar dates given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Subscription {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(CaloriaError::InvalidInput(format!(
                "subscription ends ({}) before it starts ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Days left; the full window before it starts, 0 once it is over.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.end - today.max(self.start)).num_days().max(0)
    }

    /// Share of the window elapsed, 0.0 to 1.0.
    pub fn progress(&self, today: NaiveDate) -> f64 {
        let total = self.total_days();
        if total <= 0 {
            return 0.0;
        }
        let elapsed = (today.min(self.end) - self.start).num_days().max(0);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.start <= today && today <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn quarter() -> Subscription {
        // 90 days
        Subscription::new(date(1, 1), date(4, 1)).unwrap()
    }

    #[test]
    fn test_midway() {
        let sub = quarter();
        assert_eq!(sub.total_days(), 90);
        assert_eq!(sub.days_remaining(date(2, 15)), 45);
        assert!((sub.progress(date(2, 15)) - 0.5).abs() < 1e-9);
        assert!(sub.is_active(date(2, 15)));
    }

    #[test]
    fn test_before_start_and_after_end() {
        let sub = quarter();
        assert_eq!(sub.days_remaining(date(1, 1).pred_opt().unwrap()), 90);
        assert_eq!(sub.progress(date(1, 1).pred_opt().unwrap()), 0.0);

        assert_eq!(sub.days_remaining(date(5, 1)), 0);
        assert_eq!(sub.progress(date(5, 1)), 1.0);
        assert!(!sub.is_active(date(5, 1)));
    }

    #[test]
    fn test_single_day_window() {
        let sub = Subscription::new(date(3, 1), date(3, 1)).unwrap();
        assert_eq!(sub.progress(date(3, 1)), 0.0);
        assert_eq!(sub.days_remaining(date(3, 1)), 0);
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert!(Subscription::new(date(3, 2), date(3, 1)).is_err());
    }
}
