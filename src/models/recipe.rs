use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CaloriaError;

/// Subscription tier that decides which recipes are unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    /// Entry tier: only free-sample recipes are unlocked.
    #[default]
    Discipulo,
    /// Full access.
    Fiel,
}

impl PlanTier {
    pub fn label(&self) -> &'static str {
        match self {
            PlanTier::Discipulo => "Discipulo (3 months)",
            PlanTier::Fiel => "Fiel",
        }
    }

    pub fn has_full_access(&self) -> bool {
        matches!(self, PlanTier::Fiel)
    }
}

impl FromStr for PlanTier {
    type Err = CaloriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discipulo" | "discípulo" => Ok(PlanTier::Discipulo),
            "fiel" => Ok(PlanTier::Fiel),
            other => Err(CaloriaError::InvalidInput(format!(
                "unknown plan tier '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub time_min: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub kcal: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    /// Unlocked on every tier.
    #[serde(default)]
    pub free_sample: bool,
    pub created_at: NaiveDateTime,
}

fn default_servings() -> u32 {
    1
}
