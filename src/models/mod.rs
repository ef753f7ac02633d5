mod account;
mod diary;
mod plan;
mod profile;
mod recipe;
mod tracking;

pub use account::Subscription;
pub use diary::{DiaryEntry, MealType, Nutrients, Per100g};
pub use plan::{
    MacroGrams, MacroSpec, PercentMacros, PercentSplit, PlanInput, PlanNotice, PlanResult,
    RatioMacros, SavedPlan,
};
pub use profile::{ActivityLevel, BodyProfile, Goal, Profile, Sex};
pub use recipe::{PlanTier, Recipe};
pub use tracking::{
    Checkin, CheckinNotes, CheckinScores, Circumferences, FastingLog, Measurement, ProgressPhoto,
};
