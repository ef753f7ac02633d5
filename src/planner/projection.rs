use chrono::{Datelike, NaiveDate};

use crate::models::Goal;
use crate::planner::constants::{DEFAULT_AGE_YEARS, WEEKLY_GAIN_KG, WEEKLY_LOSS_KG};

/// Completed years between `dob` and `today`.
///
/// Missing dates fall back to a default age.
pub fn age_from_dob(dob: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(dob) = dob else {
        return DEFAULT_AGE_YEARS;
    };

    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Estimated weeks to reach `target_kg` at a conservative pace.
///
/// Maintenance, or a target already reached, yields 0.
pub fn weeks_to_target(current_kg: f64, target_kg: f64, goal: Goal) -> u32 {
    let (delta, pace) = match goal {
        Goal::Deficit => ((current_kg - target_kg).max(0.0), WEEKLY_LOSS_KG),
        Goal::Surplus => ((target_kg - current_kg).max(0.0), WEEKLY_GAIN_KG),
        Goal::Maintenance => return 0,
    };

    if delta <= 0.0 {
        0
    } else {
        (delta / pace).ceil() as u32
    }
}

/// Linear weekly weight series from `current_kg` to `target_kg`, `weeks + 1` points.
pub fn projected_weights(current_kg: f64, target_kg: f64, goal: Goal, weeks: u32) -> Vec<f64> {
    let steps = weeks.max(1) as f64;
    let step = match goal {
        Goal::Deficit | Goal::Surplus => (target_kg - current_kg) / steps,
        Goal::Maintenance => 0.0,
    };

    (0..=weeks).map(|i| current_kg + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = Some(date(1995, 6, 15));
        assert_eq!(age_from_dob(dob, date(2025, 6, 14)), 29);
        assert_eq!(age_from_dob(dob, date(2025, 6, 15)), 30);
    }

    #[test]
    fn test_age_default_without_dob() {
        assert_eq!(age_from_dob(None, date(2025, 1, 1)), DEFAULT_AGE_YEARS);
    }

    #[test]
    fn test_age_never_negative() {
        assert_eq!(age_from_dob(Some(date(2030, 1, 1)), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_weeks_to_target() {
        assert_eq!(weeks_to_target(80.0, 75.0, Goal::Deficit), 10);
        assert_eq!(weeks_to_target(80.0, 75.2, Goal::Deficit), 10); // 9.6 -> 10
        assert_eq!(weeks_to_target(70.0, 72.0, Goal::Surplus), 8);
        assert_eq!(weeks_to_target(70.0, 75.0, Goal::Deficit), 0);
        assert_eq!(weeks_to_target(70.0, 60.0, Goal::Maintenance), 0);
    }

    #[test]
    fn test_projected_weights_endpoints() {
        let series = projected_weights(80.0, 75.0, Goal::Deficit, 10);
        assert_eq!(series.len(), 11);
        assert!((series[0] - 80.0).abs() < 1e-9);
        assert!((series[10] - 75.0).abs() < 1e-9);

        let flat = projected_weights(70.0, 65.0, Goal::Maintenance, 3);
        assert!(flat.iter().all(|w| (*w - 70.0).abs() < 1e-9));
    }
}
