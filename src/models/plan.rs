use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{ActivityLevel, BodyProfile, Goal};
use crate::planner::constants::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};

/// How macro grams are derived from the calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MacroSpec {
    /// Protein and fat prescribed per kg of body weight; carbs take the rest.
    Ratios {
        protein_g_per_kg: f64,
        fat_g_per_kg: f64,
    },
    /// Share of the calorie target, normalized to 100 before use.
    Percentages { protein: f64, carb: f64, fat: f64 },
}

/// Macro amounts in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_g: f64,
    pub carb_g: f64,
    pub fat_g: f64,
}

impl MacroGrams {
    pub fn protein_kcal(&self) -> f64 {
        self.protein_g * KCAL_PER_G_PROTEIN
    }

    pub fn carb_kcal(&self) -> f64 {
        self.carb_g * KCAL_PER_G_CARB
    }

    pub fn fat_kcal(&self) -> f64 {
        self.fat_g * KCAL_PER_G_FAT
    }

    /// Calories represented by all three macros.
    pub fn total_kcal(&self) -> f64 {
        self.protein_kcal() + self.carb_kcal() + self.fat_kcal()
    }
}

/// Protein/carb/fat split in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentSplit {
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

/// Result of the g/kg method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioMacros {
    pub grams: MacroGrams,
    /// Calories left for carbohydrates; negative when the budget is exceeded.
    pub leftover_kcal: f64,
}

impl RatioMacros {
    pub fn budget_exceeded(&self) -> bool {
        self.leftover_kcal < 0.0
    }

    pub fn notice(&self) -> Option<PlanNotice> {
        self.budget_exceeded().then(|| PlanNotice::BudgetExceeded {
            deficit_kcal: -self.leftover_kcal,
        })
    }
}

/// Result of the percentage method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentMacros {
    pub grams: MacroGrams,
    /// Percentages actually used, always summing to 100.
    pub split: PercentSplit,
    /// Sum of the percentages as entered.
    pub original_sum: f64,
    pub normalized: bool,
}

impl PercentMacros {
    pub fn notice(&self) -> Option<PlanNotice> {
        self.normalized.then(|| PlanNotice::Normalized {
            original_sum: self.original_sum,
            split: self.split,
        })
    }
}

/// Non-fatal conditions reported alongside a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanNotice {
    /// Percentages did not sum to 100 and were rescaled.
    Normalized { original_sum: f64, split: PercentSplit },
    /// Protein and fat per kg alone exceed the calorie target; carbs were zeroed.
    BudgetExceeded { deficit_kcal: f64 },
}

impl PlanNotice {
    pub fn message(&self) -> String {
        match self {
            PlanNotice::Normalized {
                original_sum,
                split,
            } => format!(
                "Percentages summed to {:.1}%. Normalized to 100% -> Protein {:.1}%, Carbs {:.1}%, Fat {:.1}%.",
                original_sum, split.protein, split.carb, split.fat
            ),
            PlanNotice::BudgetExceeded { deficit_kcal } => format!(
                "Protein/fat per kg exceed the calorie target by {:.0} kcal; carbs set to zero. Adjust the targets or calories.",
                deficit_kcal
            ),
        }
    }
}

/// Everything needed to compute a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanInput {
    pub body: BodyProfile,
    pub activity: ActivityLevel,
    pub goal: Goal,
    /// Overrides the goal's default adjustment when set.
    pub adjustment_percent: Option<f64>,
    pub macros: MacroSpec,
}

impl PlanInput {
    pub fn effective_adjustment(&self) -> f64 {
        self.adjustment_percent
            .unwrap_or_else(|| self.goal.default_adjustment())
    }
}

/// Output bundle of a plan calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub bmr: f64,
    pub tdee: f64,
    pub adjustment_percent: f64,
    pub target_kcal: f64,
    pub water_ml: f64,
    pub macros: MacroGrams,
    pub protein_kcal: f64,
    pub carb_kcal: f64,
    pub fat_kcal: f64,
    #[serde(default)]
    pub notices: Vec<PlanNotice>,
}

impl PlanResult {
    pub fn water_liters(&self) -> f64 {
        self.water_ml / 1000.0
    }

    pub fn budget_exceeded(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n, PlanNotice::BudgetExceeded { .. }))
    }
}

/// A plan the user chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub input: PlanInput,
    pub result: PlanResult,
}

impl SavedPlan {
    pub fn new(created_at: NaiveDateTime, input: PlanInput, result: PlanResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            input,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_kcal() {
        let grams = MacroGrams {
            protein_g: 100.0,
            carb_g: 200.0,
            fat_g: 50.0,
        };
        assert_eq!(grams.protein_kcal(), 400.0);
        assert_eq!(grams.carb_kcal(), 800.0);
        assert_eq!(grams.fat_kcal(), 450.0);
        assert_eq!(grams.total_kcal(), 1650.0);
    }

    #[test]
    fn test_ratio_notice_only_when_negative() {
        let ok = RatioMacros {
            grams: MacroGrams::default(),
            leftover_kcal: 0.0,
        };
        assert!(ok.notice().is_none());

        let over = RatioMacros {
            grams: MacroGrams::default(),
            leftover_kcal: -25.0,
        };
        assert_eq!(
            over.notice(),
            Some(PlanNotice::BudgetExceeded { deficit_kcal: 25.0 })
        );
    }

    #[test]
    fn test_macro_spec_serde_tag() {
        let spec = MacroSpec::Ratios {
            protein_g_per_kg: 2.0,
            fat_g_per_kg: 0.8,
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains(r#""method":"ratios""#));
        let back: MacroSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
