use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CaloriaError;
use crate::models::plan::MacroGrams;

/// Meal slot of a diary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snack,
    PreWorkout,
    PostWorkout,
    Other,
    /// Saved straight from photo detection.
    AiAuto,
    /// Saved from photo detection after review.
    AiEstimate,
}

impl MealType {
    /// Slots a user can pick by hand.
    pub const MANUAL: [MealType; 7] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
        MealType::PreWorkout,
        MealType::PostWorkout,
        MealType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
            MealType::PreWorkout => "Pre-workout",
            MealType::PostWorkout => "Post-workout",
            MealType::Other => "Other",
            MealType::AiAuto => "AI (auto)",
            MealType::AiEstimate => "AI (estimate)",
        }
    }
}

impl FromStr for MealType {
    type Err = CaloriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            "pre_workout" => Ok(MealType::PreWorkout),
            "post_workout" => Ok(MealType::PostWorkout),
            "other" => Ok(MealType::Other),
            other => Err(CaloriaError::InvalidInput(format!(
                "unknown meal type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged food or meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub ref_date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub qty_g: Option<f64>,
    #[serde(default)]
    pub kcal: Option<f64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
    #[serde(default)]
    pub photo_path: Option<String>,
    pub created_at: NaiveDateTime,
}

impl DiaryEntry {
    /// Short one-line label for selection lists.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} ({})",
            self.meal_type,
            self.description.as_deref().unwrap_or(""),
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Macro values per 100 g of a food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Per100g {
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Per100g {
    pub const fn new(kcal: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            kcal,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    /// Values for a portion of `grams`.
    pub fn scale(&self, grams: f64) -> Nutrients {
        let factor = grams / 100.0;
        Nutrients {
            kcal: self.kcal * factor,
            macros: MacroGrams {
                protein_g: self.protein_g * factor,
                carb_g: self.carbs_g * factor,
                fat_g: self.fat_g * factor,
            },
        }
    }
}

/// Energy and macros of a portion or a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub kcal: f64,
    pub macros: MacroGrams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_per_100g() {
        let chicken = Per100g::new(165.0, 31.0, 0.0, 3.6);
        let portion = chicken.scale(150.0);
        assert!((portion.kcal - 247.5).abs() < 1e-9);
        assert!((portion.macros.protein_g - 46.5).abs() < 1e-9);
        assert!((portion.macros.fat_g - 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_meal_type_parse() {
        assert_eq!("Pre-workout".parse::<MealType>().unwrap(), MealType::PreWorkout);
        assert_eq!("post workout".parse::<MealType>().unwrap(), MealType::PostWorkout);
        assert!("brunch".parse::<MealType>().is_err());
    }
}
