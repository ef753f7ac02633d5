use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::Goal;

/// Energy per gram of protein.
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;

/// Energy per gram of carbohydrate.
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Energy per gram of fat.
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Mifflin-St Jeor offset for the male category.
pub const BMR_OFFSET_MALE: f64 = 5.0;

/// Mifflin-St Jeor offset for every other category.
pub const BMR_OFFSET_FEMALE: f64 = -161.0;

/// Multiplier used when an activity key is not in the table.
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.2;

/// Daily water per kg of body weight.
pub const WATER_ML_PER_KG: f64 = 35.0;

/// Allowed distance of a percentage split from 100 before it is normalized.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.01;

// ─────────────────────────────────────────────────────────────────────────────
// Input bounds used by prompts (the calculator itself does not clamp)
// ─────────────────────────────────────────────────────────────────────────────

pub const ADJUSTMENT_MIN: f64 = -40.0;
pub const ADJUSTMENT_MAX: f64 = 40.0;

pub const WEIGHT_MIN_KG: f64 = 30.0;
pub const WEIGHT_MAX_KG: f64 = 300.0;

pub const HEIGHT_MIN_CM: f64 = 120.0;
pub const HEIGHT_MAX_CM: f64 = 230.0;

pub const AGE_MIN: u32 = 14;
pub const AGE_MAX: u32 = 100;

pub const PROTEIN_G_PER_KG_MIN: f64 = 0.5;
pub const PROTEIN_G_PER_KG_MAX: f64 = 3.0;

pub const FAT_G_PER_KG_MIN: f64 = 0.2;
pub const FAT_G_PER_KG_MAX: f64 = 2.0;

pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// Suggested protein prescription.
pub const DEFAULT_PROTEIN_G_PER_KG: f64 = 2.0;

/// Suggested fat prescription.
pub const DEFAULT_FAT_G_PER_KG: f64 = 0.8;

/// Suggested split (protein, carb, fat).
pub const DEFAULT_PERCENT_SPLIT: (f64, f64, f64) = (30.0, 40.0, 30.0);

// ─────────────────────────────────────────────────────────────────────────────
// Onboarding projections
// ─────────────────────────────────────────────────────────────────────────────

/// Conservative weekly loss on a deficit.
pub const WEEKLY_LOSS_KG: f64 = 0.5;

/// Conservative weekly gain on a surplus.
pub const WEEKLY_GAIN_KG: f64 = 0.25;

/// Age assumed when no date of birth is known.
pub const DEFAULT_AGE_YEARS: u32 = 30;

/// Map from activity key to TDEE multiplier.
pub static ACTIVITY_MULTIPLIERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("sedentary", 1.2);
    m.insert("light", 1.375);
    m.insert("moderate", 1.55);
    m.insert("high", 1.725);
    m.insert("athlete", 1.9);
    m
});

/// Get the activity multiplier for a key, falling back to sedentary.
pub fn activity_multiplier(key: &str) -> f64 {
    *ACTIVITY_MULTIPLIERS
        .get(key.trim().to_lowercase().as_str())
        .unwrap_or(&DEFAULT_ACTIVITY_MULTIPLIER)
}

/// Default TDEE adjustment for a goal, in percent.
pub fn goal_adjustment_percent(goal: Goal) -> f64 {
    match goal {
        Goal::Deficit => -20.0,
        Goal::Maintenance => 0.0,
        Goal::Surplus => 15.0,
    }
}
