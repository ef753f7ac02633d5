use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CaloriaError;
use crate::planner::constants::{activity_multiplier, goal_adjustment_percent};

/// Biological sex category. Only selects the BMR offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn key(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = CaloriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "masculino" => Ok(Sex::Male),
            "female" | "f" | "feminino" => Ok(Sex::Female),
            other => Err(CaloriaError::InvalidInput(format!("unknown sex '{}'", other))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Activity category used for the TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    High,
    Athlete,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::High,
        ActivityLevel::Athlete,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
            ActivityLevel::Athlete => "athlete",
        }
    }

    /// Human-readable label with the usual training frequency.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::Light => "Light (1-3x/week)",
            ActivityLevel::Moderate => "Moderate (3-5x/week)",
            ActivityLevel::High => "High (6-7x/week)",
            ActivityLevel::Athlete => "Athlete (2x/day)",
        }
    }

    /// Lenient parse: anything unrecognised is treated as sedentary.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "high" => ActivityLevel::High,
            "athlete" => ActivityLevel::Athlete,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn multiplier(&self) -> f64 {
        activity_multiplier(self.key())
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Calorie goal relative to maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Deficit,
    #[default]
    Maintenance,
    Surplus,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Deficit, Goal::Maintenance, Goal::Surplus];

    pub fn key(&self) -> &'static str {
        match self {
            Goal::Deficit => "deficit",
            Goal::Maintenance => "maintenance",
            Goal::Surplus => "surplus",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Goal::Deficit => "Cut (deficit)",
            Goal::Maintenance => "Maintenance",
            Goal::Surplus => "Bulk (surplus)",
        }
    }

    /// Default adjustment applied to TDEE, in percent.
    pub fn default_adjustment(&self) -> f64 {
        goal_adjustment_percent(*self)
    }
}

impl FromStr for Goal {
    type Err = CaloriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deficit" | "cut" | "lose" => Ok(Goal::Deficit),
            "maintenance" | "maintain" => Ok(Goal::Maintenance),
            "surplus" | "bulk" | "gain" => Ok(Goal::Surplus),
            other => Err(CaloriaError::InvalidInput(format!("unknown goal '{}'", other))),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Body metrics for one calculation. Values are not clamped here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: Sex,
}

impl BodyProfile {
    pub fn new(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> Self {
        Self {
            weight_kg,
            height_cm,
            age_years,
            sex,
        }
    }
}

/// Stored account profile, filled in by onboarding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub sex: Sex,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub target_weight_kg: Option<f64>,
    #[serde(default)]
    pub obstacles: Option<String>,
    #[serde(default)]
    pub onboarding_done: bool,
}
