use chrono::NaiveDate;
use tracing::debug;

use crate::error::{CaloriaError, Result};
use crate::models::{ActivityLevel, Goal, Profile, Sex};
use crate::planner::{HEIGHT_MAX_CM, HEIGHT_MIN_CM, WEIGHT_MAX_KG, WEIGHT_MIN_KG};

const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_WEIGHT_KG: f64 = 75.0;
const DEFAULT_TARGET_DROP_KG: f64 = 5.0;
const MIN_DEFAULT_TARGET_KG: f64 = 50.0;

/// Onboarding screens, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnboardingStep {
    #[default]
    Welcome,
    BasicData,
    GoalAndTarget,
    Estimates,
    Expectations,
    Rating,
    Plans,
    Obstacles,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 8] = [
        OnboardingStep::Welcome,
        OnboardingStep::BasicData,
        OnboardingStep::GoalAndTarget,
        OnboardingStep::Estimates,
        OnboardingStep::Expectations,
        OnboardingStep::Rating,
        OnboardingStep::Plans,
        OnboardingStep::Obstacles,
    ];

    /// 1-based position.
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) + 1
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "Why CalorIA is different",
            OnboardingStep::BasicData => "Your basic data",
            OnboardingStep::GoalAndTarget => "Your goal and target",
            OnboardingStep::Estimates => "Initial estimates",
            OnboardingStep::Expectations => "What to expect",
            OnboardingStep::Rating => "Enjoying the app?",
            OnboardingStep::Plans => "Plans",
            OnboardingStep::Obstacles => "What keeps you from getting there?",
        }
    }

    fn next(self) -> Self {
        let i = self.number();
        Self::ALL.get(i).copied().unwrap_or(self)
    }

    fn back(self) -> Self {
        let i = self.number();
        if i <= 1 { self } else { Self::ALL[i - 2] }
    }
}

/// Answers collected so far.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingDraft {
    pub full_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub target_weight_kg: f64,
    pub obstacles: Option<String>,
}

impl Default for OnboardingDraft {
    fn default() -> Self {
        Self {
            full_name: None,
            dob: None,
            sex: Sex::Male,
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
            activity: ActivityLevel::Moderate,
            goal: Goal::Deficit,
            target_weight_kg: default_target(DEFAULT_WEIGHT_KG),
            obstacles: None,
        }
    }
}

fn default_target(weight_kg: f64) -> f64 {
    (weight_kg - DEFAULT_TARGET_DROP_KG).max(MIN_DEFAULT_TARGET_KG)
}

impl OnboardingDraft {
    /// Start from a stored profile, keeping defaults for anything missing.
    pub fn from_profile(profile: &Profile) -> Self {
        let defaults = Self::default();
        let weight_kg = profile.weight_kg.unwrap_or(defaults.weight_kg);
        Self {
            full_name: profile.full_name.clone(),
            dob: profile.dob,
            sex: profile.sex,
            height_cm: profile.height_cm.unwrap_or(defaults.height_cm),
            weight_kg,
            activity: if profile.onboarding_done {
                profile.activity
            } else {
                defaults.activity
            },
            goal: profile.goal,
            target_weight_kg: profile
                .target_weight_kg
                .unwrap_or_else(|| default_target(weight_kg)),
            obstacles: profile.obstacles.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        let in_range = |v: f64, lo: f64, hi: f64| v.is_finite() && (lo..=hi).contains(&v);
        if !in_range(self.height_cm, HEIGHT_MIN_CM, HEIGHT_MAX_CM) {
            return Err(CaloriaError::InvalidInput(format!(
                "height must be between {} and {} cm",
                HEIGHT_MIN_CM, HEIGHT_MAX_CM
            )));
        }
        for (label, value) in [("weight", self.weight_kg), ("target weight", self.target_weight_kg)] {
            if !in_range(value, WEIGHT_MIN_KG, WEIGHT_MAX_KG) {
                return Err(CaloriaError::InvalidInput(format!(
                    "{} must be between {} and {} kg",
                    label, WEIGHT_MIN_KG, WEIGHT_MAX_KG
                )));
            }
        }
        Ok(())
    }
}

/// Step-by-step onboarding state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnboardingWizard {
    pub step: OnboardingStep,
    pub draft: OnboardingDraft,
}

impl OnboardingWizard {
    pub fn new(draft: OnboardingDraft) -> Self {
        Self {
            step: OnboardingStep::default(),
            draft,
        }
    }

    pub fn next(&mut self) {
        self.step = self.step.next();
        debug!(step = self.step.number(), "Onboarding forward");
    }

    pub fn back(&mut self) {
        self.step = self.step.back();
        debug!(step = self.step.number(), "Onboarding back");
    }

    pub fn is_last(&self) -> bool {
        self.step == OnboardingStep::Obstacles
    }

    /// Validate the draft and turn it into a finished profile.
    pub fn complete(&self) -> Result<Profile> {
        self.draft.validate()?;
        let d = &self.draft;
        Ok(Profile {
            full_name: d
                .full_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            dob: d.dob,
            sex: d.sex,
            height_cm: Some(d.height_cm),
            weight_kg: Some(d.weight_kg),
            activity: d.activity,
            goal: d.goal,
            target_weight_kg: Some(d.target_weight_kg),
            obstacles: d
                .obstacles
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            onboarding_done: true,
        })
    }
}

/// (likely symptoms, how the app helps) for a goal.
pub fn expectations(goal: Goal) -> (&'static str, &'static str) {
    match goal {
        Goal::Deficit => (
            "Less energy, hunger on some days, a dip in performance.",
            "Progressive deficit, hydration, optional fasting and a weekly data review.",
        ),
        Goal::Surplus => (
            "Sleepiness after meals, slow gains on the scale, feeling bloated.",
            "Macro split, food diary and weight tracking.",
        ),
        Goal::Maintenance => (
            "Few changes; consistency is the work.",
            "Fine adjustments as your routine changes.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_walk_forward_and_back() {
        let mut wizard = OnboardingWizard::default();
        wizard.back();
        assert_eq!(wizard.step, OnboardingStep::Welcome);

        for _ in 0..7 {
            wizard.next();
        }
        assert!(wizard.is_last());
        wizard.next();
        assert_eq!(wizard.step, OnboardingStep::Obstacles);

        wizard.back();
        assert_eq!(wizard.step, OnboardingStep::Plans);
        assert_eq!(wizard.step.number(), 7);
    }

    #[test]
    fn test_draft_defaults() {
        let draft = OnboardingDraft::default();
        assert_eq!(draft.height_cm, 170.0);
        assert_eq!(draft.target_weight_kg, 70.0);
        assert_eq!(draft.activity, ActivityLevel::Moderate);

        let light = Profile {
            weight_kg: Some(52.0),
            ..Default::default()
        };
        assert_eq!(OnboardingDraft::from_profile(&light).target_weight_kg, 50.0);
    }

    #[test]
    fn test_complete_marks_done_and_trims() {
        let mut wizard = OnboardingWizard::default();
        wizard.draft.full_name = Some("  Ana Souza ".to_string());
        wizard.draft.obstacles = Some("   ".to_string());
        wizard.draft.goal = Goal::Surplus;

        let profile = wizard.complete().unwrap();
        assert!(profile.onboarding_done);
        assert_eq!(profile.full_name.as_deref(), Some("Ana Souza"));
        assert_eq!(profile.obstacles, None);
        assert_eq!(profile.goal, Goal::Surplus);
        assert_eq!(profile.weight_kg, Some(75.0));
    }

    #[test]
    fn test_complete_rejects_out_of_range() {
        let mut wizard = OnboardingWizard::default();
        wizard.draft.height_cm = 90.0;
        assert!(matches!(
            wizard.complete(),
            Err(CaloriaError::InvalidInput(_))
        ));
    }
}
