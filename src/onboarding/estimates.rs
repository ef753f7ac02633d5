use chrono::NaiveDate;

use super::wizard::OnboardingDraft;
use crate::planner::{
    age_from_dob, compute_bmr, compute_target_calories, compute_tdee, compute_water_target_ml,
    projected_weights, weeks_to_target,
};

/// First numbers shown to a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialEstimates {
    pub age_years: u32,
    pub bmr: f64,
    pub tdee: f64,
    pub target_kcal: f64,
    pub water_liters: f64,
    pub weeks_to_target: u32,
    /// Weekly projected weights, empty when already at target.
    pub projection: Vec<f64>,
}

pub fn initial_estimates(draft: &OnboardingDraft, today: NaiveDate) -> InitialEstimates {
    let age_years = age_from_dob(draft.dob, today);
    let bmr = compute_bmr(draft.weight_kg, draft.height_cm, age_years, draft.sex);
    let tdee = compute_tdee(bmr, draft.activity);
    let target_kcal = compute_target_calories(tdee, draft.goal.default_adjustment());
    let weeks = weeks_to_target(draft.weight_kg, draft.target_weight_kg, draft.goal);
    let projection = if weeks > 0 {
        projected_weights(draft.weight_kg, draft.target_weight_kg, draft.goal, weeks)
    } else {
        Vec::new()
    };

    InitialEstimates {
        age_years,
        bmr,
        tdee,
        target_kcal,
        water_liters: compute_water_target_ml(draft.weight_kg) / 1000.0,
        weeks_to_target: weeks,
        projection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Sex};
    use assert_float_eq::assert_float_absolute_eq;

    #[test]
    fn test_estimates_for_default_draft() {
        let draft = OnboardingDraft {
            dob: NaiveDate::from_ymd_opt(1995, 1, 1),
            sex: Sex::Male,
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let est = initial_estimates(&draft, today);

        assert_eq!(est.age_years, 30);
        // 10*75 + 6.25*170 - 5*30 + 5
        assert_float_absolute_eq!(est.bmr, 1667.5, 1e-9);
        assert_float_absolute_eq!(est.tdee, 1667.5 * 1.55, 1e-9);
        assert_float_absolute_eq!(est.target_kcal, 1667.5 * 1.55 * 0.8, 1e-9);
        assert_float_absolute_eq!(est.water_liters, 2.625, 1e-9);
        assert_eq!(est.weeks_to_target, 10);
        assert_eq!(est.projection.len(), 11);
        assert_float_absolute_eq!(est.projection[10], 70.0, 1e-9);
    }

    #[test]
    fn test_no_projection_at_target() {
        let draft = OnboardingDraft {
            goal: Goal::Maintenance,
            ..Default::default()
        };
        let est = initial_estimates(&draft, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(est.weeks_to_target, 0);
        assert!(est.projection.is_empty());
    }
}
