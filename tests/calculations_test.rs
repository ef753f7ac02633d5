use assert_float_eq::assert_float_absolute_eq;

use caloria_rs::CaloriaError;
use caloria_rs::models::{
    ActivityLevel, BodyProfile, Goal, MacroSpec, PlanInput, PlanNotice, Sex,
};
use caloria_rs::planner::{
    activity_multiplier, build_plan_result, compute_bmr, compute_target_calories, compute_tdee,
    compute_water_target_ml, macros_from_percentages, macros_from_ratios,
};

#[test]
fn test_bmr_reference_value() {
    assert_float_absolute_eq!(compute_bmr(75.0, 175.0, 30, Sex::Male), 1698.75, 1e-9);
    assert_float_absolute_eq!(compute_bmr(75.0, 175.0, 30, Sex::Female), 1532.75, 1e-9);
}

#[test]
fn test_bmr_linear_in_weight_and_height() {
    let base = compute_bmr(60.0, 160.0, 40, Sex::Female);
    assert_float_absolute_eq!(compute_bmr(61.0, 160.0, 40, Sex::Female) - base, 10.0, 1e-9);
    assert_float_absolute_eq!(compute_bmr(60.0, 164.0, 40, Sex::Female) - base, 25.0, 1e-9);
    assert_float_absolute_eq!(compute_bmr(60.0, 160.0, 41, Sex::Female) - base, -5.0, 1e-9);
}

#[test]
fn test_tdee_multiplier_table() {
    let expected = [
        (ActivityLevel::Sedentary, 1.2),
        (ActivityLevel::Light, 1.375),
        (ActivityLevel::Moderate, 1.55),
        (ActivityLevel::High, 1.725),
        (ActivityLevel::Athlete, 1.9),
    ];
    for (level, multiplier) in expected {
        assert_float_absolute_eq!(compute_tdee(1500.0, level), 1500.0 * multiplier, 1e-9);
    }
}

#[test]
fn test_unknown_activity_falls_back_to_sedentary() {
    assert_float_absolute_eq!(activity_multiplier("marathon monk"), 1.2, 1e-12);
    assert_float_absolute_eq!(
        compute_tdee(1500.0, ActivityLevel::from_key("marathon monk")),
        1800.0,
        1e-9
    );
}

#[test]
fn test_target_calories() {
    assert_float_absolute_eq!(compute_target_calories(2000.0, -20.0), 1600.0, 1e-9);
    assert_float_absolute_eq!(compute_target_calories(2000.0, 15.0), 2300.0, 1e-9);
    assert_float_absolute_eq!(compute_target_calories(2000.0, 0.0), 2000.0, 1e-9);
}

#[test]
fn test_percentages_exact_split() {
    let m = macros_from_percentages(2000.0, 30.0, 40.0, 30.0).unwrap();
    assert_float_absolute_eq!(m.grams.protein_g, 150.0, 1e-9);
    assert_float_absolute_eq!(m.grams.carb_g, 200.0, 1e-9);
    assert_float_absolute_eq!(m.grams.fat_g, 66.7, 0.05);
    assert!(!m.normalized);
    assert!(m.notice().is_none());
}

#[test]
fn test_percentages_normalized() {
    let m = macros_from_percentages(2000.0, 30.0, 30.0, 30.0).unwrap();
    assert!(m.normalized);
    assert_float_absolute_eq!(m.split.protein, 33.3, 0.05);
    assert_float_absolute_eq!(m.split.carb, 33.3, 0.05);
    assert_float_absolute_eq!(m.split.fat, 33.3, 0.05);
    assert_float_absolute_eq!(m.grams.protein_g, 2000.0 / 3.0 / 4.0, 1e-9);
    assert_float_absolute_eq!(m.grams.fat_g, 2000.0 / 3.0 / 9.0, 1e-9);

    match m.notice() {
        Some(PlanNotice::Normalized { original_sum, .. }) => {
            assert_float_absolute_eq!(original_sum, 90.0, 1e-9)
        }
        other => panic!("expected normalization notice, got {:?}", other),
    }
}

#[test]
fn test_percentages_zero_sum_rejected() {
    assert!(matches!(
        macros_from_percentages(2000.0, 0.0, 0.0, 0.0),
        Err(CaloriaError::InvalidInput(_))
    ));
}

#[test]
fn test_ratios_budget_exceeded() {
    let m = macros_from_ratios(75.0, 2.5, 1.0, 1400.0);
    assert_float_absolute_eq!(m.grams.protein_g, 187.5, 1e-9);
    assert_float_absolute_eq!(m.grams.protein_kcal(), 750.0, 1e-9);
    assert_float_absolute_eq!(m.grams.fat_g, 75.0, 1e-9);
    assert_float_absolute_eq!(m.grams.fat_kcal(), 675.0, 1e-9);
    assert_float_absolute_eq!(m.grams.carb_g, 0.0, 1e-12);
    assert_float_absolute_eq!(m.leftover_kcal, -25.0, 1e-9);
    assert!(m.budget_exceeded());

    match m.notice() {
        Some(PlanNotice::BudgetExceeded { deficit_kcal }) => {
            assert_float_absolute_eq!(deficit_kcal, 25.0, 1e-9)
        }
        other => panic!("expected budget notice, got {:?}", other),
    }
}

#[test]
fn test_ratios_within_budget() {
    let m = macros_from_ratios(70.0, 2.0, 0.8, 2200.0);
    // 2200 - (140*4 + 56*9) = 1136 kcal -> 284 g carbs
    assert_float_absolute_eq!(m.grams.carb_g, 284.0, 1e-9);
    assert!(m.notice().is_none());
}

#[test]
fn test_percentage_round_trip_kcal() {
    let splits = [(30.0, 40.0, 30.0), (25.0, 25.0, 25.0), (10.0, 70.0, 35.0), (1.0, 0.0, 0.0)];
    for target in [1200.0, 1834.5, 2650.0, 4000.0] {
        for (p, c, f) in splits {
            let m = macros_from_percentages(target, p, c, f).unwrap();
            assert_float_absolute_eq!(m.grams.total_kcal(), target, 1.0);
        }
    }
}

#[test]
fn test_water_target() {
    assert_float_absolute_eq!(compute_water_target_ml(80.0), 2800.0, 1e-9);
}

#[test]
fn test_full_plan_surfaces_budget_warning() {
    let input = PlanInput {
        body: BodyProfile::new(75.0, 175.0, 30, Sex::Male),
        activity: ActivityLevel::Sedentary,
        goal: Goal::Deficit,
        adjustment_percent: Some(-40.0),
        macros: MacroSpec::Ratios {
            protein_g_per_kg: 2.5,
            fat_g_per_kg: 1.0,
        },
    };
    let result = build_plan_result(&input).unwrap();

    // 1698.75 * 1.2 * 0.6 = 1223.1 kcal, below the 1425 kcal of protein + fat
    assert_float_absolute_eq!(result.target_kcal, 1223.1, 1e-6);
    assert!(result.budget_exceeded());
    assert_eq!(result.macros.carb_g, 0.0);
    assert_float_absolute_eq!(result.water_ml, 2625.0, 1e-9);
}

#[test]
fn test_full_plan_percentages() {
    let input = PlanInput {
        body: BodyProfile::new(62.0, 165.0, 28, Sex::Female),
        activity: ActivityLevel::Light,
        goal: Goal::Maintenance,
        adjustment_percent: None,
        macros: MacroSpec::Percentages {
            protein: 30.0,
            carb: 40.0,
            fat: 30.0,
        },
    };
    let result = build_plan_result(&input).unwrap();

    assert_eq!(result.adjustment_percent, 0.0);
    assert_float_absolute_eq!(result.target_kcal, result.tdee, 1e-9);
    assert_float_absolute_eq!(
        result.protein_kcal + result.carb_kcal + result.fat_kcal,
        result.target_kcal,
        1.0
    );
    assert!(result.notices.is_empty());
}
