use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::account::ProfileEdit;
use crate::error::Result;
use crate::models::{
    ActivityLevel, BodyProfile, Profile, CheckinNotes, CheckinScores, Circumferences, Goal, MacroGrams,
    MacroSpec, MealType, Sex,
};
use crate::onboarding::{OnboardingDraft, OnboardingStep};
use crate::planner::*;
use crate::tracking::MealInput;

/// Suggestions below this similarity are not offered.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Prompt for a number within `[min, max]`, re-asking until valid.
pub fn prompt_number<T>(prompt: &str, default: T, min: T, max: T) -> Result<T>
where
    T: Copy + Display + FromStr + PartialOrd + 'static,
    <T as FromStr>::Err: Display,
{
    let value = Input::<T>::new()
        .with_prompt(prompt)
        .default(default)
        .validate_with(move |v: &T| bounds_check(v, min, max))
        .interact_text()?;
    Ok(value)
}

/// NaN fails the range test, so "nan" is re-asked like any out-of-range value.
fn bounds_check<T: PartialOrd + Display + Copy>(
    value: &T,
    min: T,
    max: T,
) -> std::result::Result<(), String> {
    if (min..=max).contains(value) {
        Ok(())
    } else {
        Err(format!("Enter a value between {} and {}", min, max))
    }
}

/// Prompt for free text; blank answers become `None`.
pub fn prompt_optional_text(prompt: &str, initial: Option<&str>) -> Result<Option<String>> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(text) = initial {
        input = input.with_initial_text(text);
    }
    let text = input.interact_text()?;
    let text = text.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Prompt for a date in `YYYY-MM-DD`.
pub fn prompt_date(prompt: &str, default: NaiveDate) -> Result<NaiveDate> {
    let text = Input::<String>::new()
        .with_prompt(format!("{} (YYYY-MM-DD)", prompt))
        .default(default.format("%Y-%m-%d").to_string())
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "Use the YYYY-MM-DD format".to_string())
        })
        .interact_text()?;
    Ok(NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").unwrap_or(default))
}

/// Pick one of `items` from a list.
pub fn prompt_select<T: Copy + Display>(prompt: &str, items: &[T], default: T) -> Result<T>
where
    T: PartialEq,
{
    let default_index = items.iter().position(|i| *i == default).unwrap_or(0);
    let labels: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default_index)
        .interact()?;
    Ok(items[selection])
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn prompt_sex(default: Sex) -> Result<Sex> {
    prompt_select("Sex", &[Sex::Male, Sex::Female], default)
}

pub fn prompt_activity(default: ActivityLevel) -> Result<ActivityLevel> {
    prompt_select("Activity level", &ActivityLevel::ALL, default)
}

pub fn prompt_goal(default: Goal) -> Result<Goal> {
    prompt_select("Goal", &Goal::ALL, default)
}

/// Body data for one calculation; `defaults` prefill the answers.
pub fn prompt_body(defaults: BodyProfile) -> Result<BodyProfile> {
    let weight_kg = prompt_number("Weight (kg)", defaults.weight_kg, WEIGHT_MIN_KG, WEIGHT_MAX_KG)?;
    let height_cm = prompt_number("Height (cm)", defaults.height_cm, HEIGHT_MIN_CM, HEIGHT_MAX_CM)?;
    let age_years = prompt_number("Age (years)", defaults.age_years, AGE_MIN, AGE_MAX)?;
    let sex = prompt_sex(defaults.sex)?;
    Ok(BodyProfile::new(weight_kg, height_cm, age_years, sex))
}

/// Calorie adjustment in percent, defaulting to the goal's and clamped to the allowed range.
pub fn prompt_adjustment(goal: Goal) -> Result<f64> {
    let value = prompt_number(
        "Calorie adjustment (%) (negative = deficit, positive = surplus)",
        goal.default_adjustment(),
        ADJUSTMENT_MIN,
        ADJUSTMENT_MAX,
    )?;
    Ok(value.clamp(ADJUSTMENT_MIN, ADJUSTMENT_MAX))
}

/// Macro method and its values.
pub fn prompt_macro_spec() -> Result<MacroSpec> {
    let methods = ["Ratios (g/kg)", "Percentages (%)"];
    let selection = Select::new()
        .with_prompt("Macro method")
        .items(&methods)
        .default(0)
        .interact()?;

    if selection == 0 {
        let protein_g_per_kg = prompt_number(
            "Protein (g/kg)",
            DEFAULT_PROTEIN_G_PER_KG,
            PROTEIN_G_PER_KG_MIN,
            PROTEIN_G_PER_KG_MAX,
        )?;
        let fat_g_per_kg = prompt_number(
            "Fat (g/kg)",
            DEFAULT_FAT_G_PER_KG,
            FAT_G_PER_KG_MIN,
            FAT_G_PER_KG_MAX,
        )?;
        Ok(MacroSpec::Ratios {
            protein_g_per_kg,
            fat_g_per_kg,
        })
    } else {
        let (p, c, f) = DEFAULT_PERCENT_SPLIT;
        let protein = prompt_number("Protein (%)", p, PERCENT_MIN, PERCENT_MAX)?;
        let carb = prompt_number("Carbs (%)", c, PERCENT_MIN, PERCENT_MAX)?;
        let fat = prompt_number("Fat (%)", f, PERCENT_MIN, PERCENT_MAX)?;
        Ok(MacroSpec::Percentages { protein, carb, fat })
    }
}

/// Name, height and weight, prefilled from the stored profile.
pub fn prompt_profile_edit(current: Option<&Profile>) -> Result<ProfileEdit> {
    let name = prompt_optional_text("Name", current.and_then(|p| p.full_name.as_deref()))?;
    let height_cm = prompt_number(
        "Height (cm)",
        current.and_then(|p| p.height_cm).unwrap_or(170.0),
        HEIGHT_MIN_CM,
        HEIGHT_MAX_CM,
    )?;
    let weight_kg = prompt_number(
        "Weight (kg)",
        current.and_then(|p| p.weight_kg).unwrap_or(70.0),
        WEIGHT_MIN_KG,
        WEIGHT_MAX_KG,
    )?;
    Ok(ProfileEdit {
        full_name: Some(name.unwrap_or_default()),
        height_cm: Some(height_cm),
        weight_kg: Some(weight_kg),
    })
}

/// A manual diary entry. Zero means "not given".
pub fn prompt_meal_input() -> Result<MealInput> {
    let meal_type = prompt_select("Meal", &MealType::MANUAL, MealType::Lunch)?;
    let description = prompt_optional_text("Description (e.g. rice, beans and chicken)", None)?;
    let qty_g = prompt_number("Quantity (g), optional", 0.0, 0.0, 5000.0)?;
    let kcal = prompt_number("Calories (kcal), 0 to derive from macros", 0.0, 0.0, 10000.0)?;
    let protein_g = prompt_number("Protein (g)", 0.0, 0.0, 1000.0)?;
    let carb_g = prompt_number("Carbs (g)", 0.0, 0.0, 1000.0)?;
    let fat_g = prompt_number("Fat (g)", 0.0, 0.0, 1000.0)?;

    Ok(MealInput {
        meal_type,
        description,
        qty_g,
        kcal,
        macros: MacroGrams {
            protein_g,
            carb_g,
            fat_g,
        },
        photo_path: None,
    })
}

/// Resolve a food name against `known`, offering close matches.
///
/// Returns `None` when the user rejects every suggestion.
pub fn prompt_food_match(input: &str, known: &[&'static str]) -> Result<Option<&'static str>> {
    let needle = input.trim().to_lowercase();
    if let Some(exact) = known.iter().find(|n| n.to_lowercase() == needle) {
        return Ok(Some(*exact));
    }

    let mut candidates: Vec<(&'static str, f64)> = known
        .iter()
        .map(|n| (*n, jaro_winkler(&n.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

    match candidates.as_slice() {
        [] => {
            println!("No matching food found for '{}'", input);
            Ok(None)
        }
        [(name, _)] => {
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", name), true)?;
            Ok(confirm.then_some(*name))
        }
        many => {
            let mut options: Vec<&str> = many.iter().take(5).map(|(n, _)| *n).collect();
            let shown = options.len();
            options.push("None of these");
            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;
            Ok((selection < shown).then(|| many[selection].0))
        }
    }
}

/// Scores (0-10) and optional notes for a weekly check-in.
pub fn prompt_checkin() -> Result<(CheckinScores, CheckinNotes)> {
    let d = CheckinScores::default();
    let ask = |label: &str, default: u8| -> Result<(u8, Option<String>)> {
        let score = prompt_number(&format!("{} (0-10)", label), default, 0, 10)?;
        let note = prompt_optional_text(&format!("{} notes", label), None)?;
        Ok((score, note))
    };

    let (sleep, sleep_note) = ask("Sleep quality", d.sleep)?;
    let (bowel, bowel_note) = ask("Bowel function", d.bowel)?;
    let (hunger, hunger_note) = ask("Hunger", d.hunger)?;
    let (motivation, motivation_note) = ask("Motivation", d.motivation)?;
    let (stress, stress_note) = ask("Stress", d.stress)?;
    let (anxiety, anxiety_note) = ask("Anxiety", d.anxiety)?;
    let (adherence, adherence_note) = ask("Diet adherence", d.adherence)?;

    Ok((
        CheckinScores {
            sleep,
            bowel,
            hunger,
            motivation,
            stress,
            anxiety,
            adherence,
        },
        CheckinNotes {
            sleep: sleep_note,
            bowel: bowel_note,
            hunger: hunger_note,
            motivation: motivation_note,
            stress: stress_note,
            anxiety: anxiety_note,
            adherence: adherence_note,
        },
    ))
}

/// Body circumferences; 0 leaves a site empty.
pub fn prompt_circumferences() -> Result<Circumferences> {
    let site = |label: &str| -> Result<Option<f64>> {
        let v = prompt_number(&format!("{} (cm), 0 to skip", label), 0.0, 0.0, 300.0)?;
        Ok((v > 0.0).then_some(v))
    };
    Ok(Circumferences {
        chest_cm: site("Chest")?,
        arm_cm: site("Arm")?,
        waist_cm: site("Waist")?,
        abdomen_cm: site("Abdomen")?,
        hip_cm: site("Hip")?,
        thigh_cm: site("Thigh")?,
        calf_cm: site("Calf")?,
    })
}

/// Ask the questions of one onboarding step, updating `draft` in place.
pub fn prompt_onboarding_step(step: OnboardingStep, draft: &mut OnboardingDraft) -> Result<()> {
    match step {
        OnboardingStep::BasicData => {
            draft.full_name = prompt_optional_text("Full name", draft.full_name.as_deref())?;
            draft.sex = prompt_sex(draft.sex)?;
            let dob_default = draft
                .dob
                .or_else(|| NaiveDate::from_ymd_opt(1995, 1, 1))
                .unwrap_or_default();
            draft.dob = Some(prompt_date("Date of birth", dob_default)?);
            draft.height_cm = prompt_number("Height (cm)", draft.height_cm, HEIGHT_MIN_CM, HEIGHT_MAX_CM)?;
            draft.weight_kg =
                prompt_number("Current weight (kg)", draft.weight_kg, WEIGHT_MIN_KG, WEIGHT_MAX_KG)?;
            draft.activity = prompt_activity(draft.activity)?;
        }
        OnboardingStep::GoalAndTarget => {
            draft.goal = prompt_goal(draft.goal)?;
            draft.target_weight_kg = prompt_number(
                "Target weight (kg)",
                draft.target_weight_kg,
                WEIGHT_MIN_KG,
                WEIGHT_MAX_KG,
            )?;
        }
        OnboardingStep::Obstacles => {
            draft.obstacles = prompt_optional_text(
                "What keeps you from getting there? (time, routine, anxiety...)",
                draft.obstacles.as_deref(),
            )?;
        }
        OnboardingStep::Welcome
        | OnboardingStep::Estimates
        | OnboardingStep::Expectations
        | OnboardingStep::Rating
        | OnboardingStep::Plans => {}
    }
    Ok(())
}

/// Navigation choice at the end of an onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Back,
    Finish,
    Quit,
}

pub fn prompt_step_action(is_first: bool, is_last: bool) -> Result<StepAction> {
    let mut actions = vec![if is_last {
        StepAction::Finish
    } else {
        StepAction::Next
    }];
    if !is_first {
        actions.push(StepAction::Back);
    }
    actions.push(StepAction::Quit);

    let labels: Vec<&str> = actions
        .iter()
        .map(|a| match a {
            StepAction::Next => "Next ->",
            StepAction::Back => "<- Back",
            StepAction::Finish => "Finish",
            StepAction::Quit => "Quit without saving",
        })
        .collect();
    let selection = Select::new().items(&labels).default(0).interact()?;
    Ok(actions[selection])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_check_rejects_nan() {
        assert!(bounds_check(&f64::NAN, 0.0, 100.0).is_err());
        assert!(bounds_check(&f64::INFINITY, 0.0, 100.0).is_err());
        assert!(bounds_check(&100.0, 0.0, 100.0).is_ok());
        assert!(bounds_check(&30u32, AGE_MIN, AGE_MAX).is_ok());
        assert!(bounds_check(&5u32, AGE_MIN, AGE_MAX).is_err());
    }
}
