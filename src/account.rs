//! Account page: direct profile edits and plan status.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{PlanTier, Profile, Subscription};
use crate::planner::{HEIGHT_MAX_CM, HEIGHT_MIN_CM, WEIGHT_MAX_KG, WEIGHT_MIN_KG, check_range};

/// Fields the account page can change; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEdit {
    pub full_name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl ProfileEdit {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.height_cm.is_none() && self.weight_kg.is_none()
    }
}

/// Apply an edit to the stored profile (or a blank one).
///
/// A blank name clears it. Height and weight are checked against the UI bounds.
pub fn apply_profile_edit(profile: Option<&Profile>, edit: &ProfileEdit) -> Result<Profile> {
    let mut updated = profile.cloned().unwrap_or_default();

    if let Some(name) = &edit.full_name {
        let name = name.trim();
        updated.full_name = (!name.is_empty()).then(|| name.to_string());
    }
    if let Some(h) = edit.height_cm {
        updated.height_cm = Some(check_range("height", h, HEIGHT_MIN_CM, HEIGHT_MAX_CM)?);
    }
    if let Some(w) = edit.weight_kg {
        updated.weight_kg = Some(check_range("weight", w, WEIGHT_MIN_KG, WEIGHT_MAX_KG)?);
    }
    Ok(updated)
}

/// What the account page shows about the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStatus {
    pub tier: PlanTier,
    pub subscription: Option<Subscription>,
    pub days_remaining: Option<i64>,
    pub progress: Option<f64>,
    pub premium_recipes: bool,
}

pub fn account_status(
    tier: PlanTier,
    subscription: Option<&Subscription>,
    today: NaiveDate,
) -> AccountStatus {
    AccountStatus {
        tier,
        subscription: subscription.copied(),
        days_remaining: subscription.map(|s| s.days_remaining(today)),
        progress: subscription.map(|s| s.progress(today)),
        premium_recipes: tier.has_full_access(),
    }
}
