use tracing::debug;

use crate::error::{CaloriaError, Result};
use crate::models::{
    ActivityLevel, MacroGrams, MacroSpec, PercentMacros, PercentSplit, PlanInput, PlanResult,
    RatioMacros, Sex,
};
use crate::planner::constants::*;
use crate::planner::validation::ensure_finite;

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
///
/// No input validation: any finite value yields a finite result, possibly
/// non-positive.
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => BMR_OFFSET_MALE,
        Sex::Female => BMR_OFFSET_FEMALE,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64 + offset
}

/// Total daily energy expenditure, kcal/day.
pub fn compute_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// TDEE scaled by a signed percentage. Clamping is left to the caller.
pub fn compute_target_calories(tdee: f64, adjustment_percent: f64) -> f64 {
    tdee * (1.0 + adjustment_percent / 100.0)
}

/// Daily water target in millilitres.
pub fn compute_water_target_ml(weight_kg: f64) -> f64 {
    weight_kg * WATER_ML_PER_KG
}

/// Macros from g/kg prescriptions; carbohydrates absorb the remaining budget.
///
/// A negative `leftover_kcal` on the result means the prescriptions alone
/// exceed `target_kcal`; carbs are floored at zero in that case.
pub fn macros_from_ratios(
    weight_kg: f64,
    protein_g_per_kg: f64,
    fat_g_per_kg: f64,
    target_kcal: f64,
) -> RatioMacros {
    let protein_g = weight_kg * protein_g_per_kg;
    let fat_g = weight_kg * fat_g_per_kg;

    let remaining = target_kcal - (protein_g * KCAL_PER_G_PROTEIN + fat_g * KCAL_PER_G_FAT);
    let carb_g = (remaining / KCAL_PER_G_CARB).max(0.0);

    RatioMacros {
        grams: MacroGrams {
            protein_g,
            carb_g,
            fat_g,
        },
        leftover_kcal: remaining,
    }
}

/// Macros from a percentage split of `target_kcal`.
///
/// Splits that do not sum to 100 (within tolerance) are rescaled. A zero
/// sum is rejected.
pub fn macros_from_percentages(
    target_kcal: f64,
    protein_pct: f64,
    carb_pct: f64,
    fat_pct: f64,
) -> Result<PercentMacros> {
    let sum = protein_pct + carb_pct + fat_pct;
    if sum == 0.0 {
        return Err(CaloriaError::InvalidInput(
            "macro percentages sum to zero".to_string(),
        ));
    }
    if !sum.is_finite() {
        return Err(CaloriaError::InvalidInput(format!(
            "macro percentages sum to {}",
            sum
        )));
    }

    let normalized = (sum - 100.0).abs() > PERCENT_SUM_TOLERANCE;
    let split = if normalized {
        PercentSplit {
            protein: protein_pct / sum * 100.0,
            carb: carb_pct / sum * 100.0,
            fat: fat_pct / sum * 100.0,
        }
    } else {
        PercentSplit {
            protein: protein_pct,
            carb: carb_pct,
            fat: fat_pct,
        }
    };

    let grams = MacroGrams {
        protein_g: target_kcal * split.protein / 100.0 / KCAL_PER_G_PROTEIN,
        carb_g: target_kcal * split.carb / 100.0 / KCAL_PER_G_CARB,
        fat_g: target_kcal * split.fat / 100.0 / KCAL_PER_G_FAT,
    };

    Ok(PercentMacros {
        grams,
        split,
        original_sum: sum,
        normalized,
    })
}

/// Run the whole pipeline for one input.
///
/// Non-finite inputs are rejected so a plan never carries NaN targets.
pub fn build_plan_result(input: &PlanInput) -> Result<PlanResult> {
    ensure_finite(input)?;
    let body = &input.body;
    let bmr = compute_bmr(body.weight_kg, body.height_cm, body.age_years, body.sex);
    let tdee = compute_tdee(bmr, input.activity);
    let adjustment_percent = input.effective_adjustment();
    let target_kcal = compute_target_calories(tdee, adjustment_percent);
    let water_ml = compute_water_target_ml(body.weight_kg);

    let (macros, notice) = match input.macros {
        MacroSpec::Ratios {
            protein_g_per_kg,
            fat_g_per_kg,
        } => {
            let r = macros_from_ratios(body.weight_kg, protein_g_per_kg, fat_g_per_kg, target_kcal);
            (r.grams, r.notice())
        }
        MacroSpec::Percentages { protein, carb, fat } => {
            let p = macros_from_percentages(target_kcal, protein, carb, fat)?;
            (p.grams, p.notice())
        }
    };

    debug!(
        bmr,
        tdee,
        target_kcal,
        adjustment_percent,
        has_notice = notice.is_some(),
        "Computed plan"
    );

    Ok(PlanResult {
        bmr,
        tdee,
        adjustment_percent,
        target_kcal,
        water_ml,
        protein_kcal: macros.protein_kcal(),
        carb_kcal: macros.carb_kcal(),
        fat_kcal: macros.fat_kcal(),
        macros,
        notices: notice.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyProfile, Goal, PlanNotice};

    fn sample_input(macros: MacroSpec) -> PlanInput {
        PlanInput {
            body: BodyProfile::new(75.0, 175.0, 30, Sex::Male),
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintenance,
            adjustment_percent: None,
            macros,
        }
    }

    #[test]
    fn test_bmr_female_offset() {
        let male = compute_bmr(60.0, 165.0, 25, Sex::Male);
        let female = compute_bmr(60.0, 165.0, 25, Sex::Female);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_accepts_nonsense_inputs() {
        let bmr = compute_bmr(0.0, 0.0, 200, Sex::Female);
        assert!(bmr.is_finite());
        assert!(bmr < 0.0);
    }

    #[test]
    fn test_ratios_within_budget() {
        let r = macros_from_ratios(80.0, 2.0, 0.8, 2500.0);
        assert!((r.grams.protein_g - 160.0).abs() < 1e-9);
        assert!((r.grams.fat_g - 64.0).abs() < 1e-9);
        // 2500 - (640 + 576) = 1284 -> 321 g
        assert!((r.grams.carb_g - 321.0).abs() < 1e-9);
        assert!(!r.budget_exceeded());
    }

    #[test]
    fn test_percentages_reject_non_finite() {
        assert!(macros_from_percentages(2000.0, f64::NAN, 40.0, 30.0).is_err());
    }

    #[test]
    fn test_build_plan_uses_goal_default_adjustment() {
        let mut input = sample_input(MacroSpec::Percentages {
            protein: 30.0,
            carb: 40.0,
            fat: 30.0,
        });
        input.goal = Goal::Deficit;
        let plan = build_plan_result(&input).unwrap();
        assert_eq!(plan.adjustment_percent, -20.0);
        assert!((plan.target_kcal - plan.tdee * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_build_plan_override_adjustment() {
        let mut input = sample_input(MacroSpec::Percentages {
            protein: 30.0,
            carb: 40.0,
            fat: 30.0,
        });
        input.adjustment_percent = Some(10.0);
        let plan = build_plan_result(&input).unwrap();
        assert!((plan.target_kcal - plan.tdee * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_build_plan_carries_budget_warning() {
        let mut input = sample_input(MacroSpec::Ratios {
            protein_g_per_kg: 3.0,
            fat_g_per_kg: 2.0,
        });
        input.adjustment_percent = Some(-40.0);
        let plan = build_plan_result(&input).unwrap();
        assert!(plan.budget_exceeded());
        assert_eq!(plan.macros.carb_g, 0.0);
        assert!(matches!(
            plan.notices[0],
            PlanNotice::BudgetExceeded { deficit_kcal } if deficit_kcal > 0.0
        ));
    }

    #[test]
    fn test_build_plan_propagates_invalid_split() {
        let input = sample_input(MacroSpec::Percentages {
            protein: 0.0,
            carb: 0.0,
            fat: 0.0,
        });
        assert!(matches!(
            build_plan_result(&input),
            Err(CaloriaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_build_plan_rejects_non_finite_adjustment() {
        let mut input = sample_input(MacroSpec::Ratios {
            protein_g_per_kg: 2.0,
            fat_g_per_kg: 0.8,
        });
        input.adjustment_percent = Some(f64::NAN);
        assert!(matches!(
            build_plan_result(&input),
            Err(CaloriaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_kcal_equivalents_match_grams() {
        let plan = build_plan_result(&sample_input(MacroSpec::Ratios {
            protein_g_per_kg: 2.0,
            fat_g_per_kg: 0.8,
        }))
        .unwrap();
        assert!((plan.protein_kcal - plan.macros.protein_g * 4.0).abs() < 1e-9);
        assert!((plan.carb_kcal - plan.macros.carb_g * 4.0).abs() < 1e-9);
        assert!((plan.fat_kcal - plan.macros.fat_g * 9.0).abs() < 1e-9);
        assert!((plan.water_ml - 2625.0).abs() < 1e-9);
    }
}
