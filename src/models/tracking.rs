use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subjective scores of a weekly check-in, 0 (worst) to 10 (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinScores {
    pub sleep: u8,
    pub bowel: u8,
    pub hunger: u8,
    pub motivation: u8,
    pub stress: u8,
    pub anxiety: u8,
    pub adherence: u8,
}

impl Default for CheckinScores {
    fn default() -> Self {
        Self {
            sleep: 7,
            bowel: 7,
            hunger: 5,
            motivation: 7,
            stress: 4,
            anxiety: 4,
            adherence: 7,
        }
    }
}

impl CheckinScores {
    pub const NAMES: [&'static str; 7] = [
        "sleep",
        "bowel",
        "hunger",
        "motivation",
        "stress",
        "anxiety",
        "adherence",
    ];

    pub fn values(&self) -> [u8; 7] {
        [
            self.sleep,
            self.bowel,
            self.hunger,
            self.motivation,
            self.stress,
            self.anxiety,
            self.adherence,
        ]
    }
}

/// Free-text notes per check-in dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinNotes {
    #[serde(default)]
    pub sleep: Option<String>,
    #[serde(default)]
    pub bowel: Option<String>,
    #[serde(default)]
    pub hunger: Option<String>,
    #[serde(default)]
    pub motivation: Option<String>,
    #[serde(default)]
    pub stress: Option<String>,
    #[serde(default)]
    pub anxiety: Option<String>,
    #[serde(default)]
    pub adherence: Option<String>,
}

/// Weekly follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkin {
    pub id: Uuid,
    pub ref_date: NaiveDate,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    pub scores: CheckinScores,
    #[serde(default)]
    pub notes: CheckinNotes,
    pub created_at: NaiveDateTime,
}

/// Body circumferences in cm, all optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circumferences {
    #[serde(default)]
    pub chest_cm: Option<f64>,
    #[serde(default)]
    pub arm_cm: Option<f64>,
    #[serde(default)]
    pub waist_cm: Option<f64>,
    #[serde(default)]
    pub abdomen_cm: Option<f64>,
    #[serde(default)]
    pub hip_cm: Option<f64>,
    #[serde(default)]
    pub thigh_cm: Option<f64>,
    #[serde(default)]
    pub calf_cm: Option<f64>,
}

impl Circumferences {
    pub const SITES: [&'static str; 7] =
        ["chest", "arm", "waist", "abdomen", "hip", "thigh", "calf"];

    pub fn values(&self) -> [Option<f64>; 7] {
        [
            self.chest_cm,
            self.arm_cm,
            self.waist_cm,
            self.abdomen_cm,
            self.hip_cm,
            self.thigh_cm,
            self.calf_cm,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Uuid,
    pub ref_date: NaiveDate,
    pub sites: Circumferences,
    pub created_at: NaiveDateTime,
}

/// One intermittent fasting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastingLog {
    pub id: Uuid,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
}

impl FastingLog {
    /// Duration in hours rounded to one decimal; `None` while still open.
    pub fn duration_hours(&self) -> Option<f64> {
        let end = self.end?;
        let hours = (end - self.start).num_seconds() as f64 / 3600.0;
        Some((hours * 10.0).round() / 10.0)
    }
}

/// A stored progress photo. `month` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPhoto {
    pub id: Uuid,
    pub month: String,
    pub file_name: String,
    pub path: PathBuf,
    pub created_at: NaiveDateTime,
}
