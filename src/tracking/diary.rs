use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{CaloriaError, Result};
use crate::foods::lookup_per_100g;
use crate::models::{DiaryEntry, MacroGrams, MealType, Nutrients, PlanResult};

/// A meal as typed in by the user. Zero values count as "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealInput {
    pub meal_type: MealType,
    pub description: Option<String>,
    pub qty_g: f64,
    pub kcal: f64,
    pub macros: MacroGrams,
    pub photo_path: Option<String>,
}

fn non_zero(value: f64) -> Option<f64> {
    (value != 0.0).then_some(value)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Calories of a meal: the given value, or 4p + 4c + 9f when missing.
pub fn resolve_kcal(kcal: f64, macros: &MacroGrams) -> f64 {
    if kcal > 0.0 { kcal } else { macros.total_kcal() }
}

/// Build a manual diary entry.
pub fn manual_entry(ref_date: NaiveDate, input: MealInput, now: NaiveDateTime) -> DiaryEntry {
    let kcal = resolve_kcal(input.kcal, &input.macros);
    DiaryEntry {
        id: Uuid::new_v4(),
        ref_date,
        meal_type: input.meal_type,
        description: non_blank(input.description),
        qty_g: non_zero(input.qty_g),
        kcal: non_zero(kcal),
        protein_g: non_zero(input.macros.protein_g),
        carbs_g: non_zero(input.macros.carb_g),
        fat_g: non_zero(input.macros.fat_g),
        photo_path: input.photo_path,
        created_at: now,
    }
}

/// Build a diary entry from the offline food table.
pub fn quick_entry(
    ref_date: NaiveDate,
    food: &str,
    grams: f64,
    meal_type: MealType,
    now: NaiveDateTime,
) -> Result<DiaryEntry> {
    if !(grams.is_finite() && grams >= 0.0) {
        return Err(CaloriaError::InvalidInput(format!(
            "grams must be a number >= 0, got {}",
            grams
        )));
    }
    let (name, per100) = lookup_per_100g(food)
        .ok_or_else(|| CaloriaError::EntryNotFound(format!("food '{}'", food)))?;
    let portion = per100.scale(grams);

    Ok(DiaryEntry {
        id: Uuid::new_v4(),
        ref_date,
        meal_type,
        description: Some(name.to_string()),
        qty_g: Some(grams),
        kcal: Some(portion.kcal),
        protein_g: Some(portion.macros.protein_g),
        carbs_g: Some(portion.macros.carb_g),
        fat_g: Some(portion.macros.fat_g),
        photo_path: None,
        created_at: now,
    })
}

/// Sum of a day's entries; missing values count as zero.
pub fn day_totals<'a, I>(entries: I) -> Nutrients
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    entries
        .into_iter()
        .fold(Nutrients::default(), |mut acc, e| {
            acc.kcal += e.kcal.unwrap_or(0.0);
            acc.macros.protein_g += e.protein_g.unwrap_or(0.0);
            acc.macros.carb_g += e.carbs_g.unwrap_or(0.0);
            acc.macros.fat_g += e.fat_g.unwrap_or(0.0);
            acc
        })
}

/// Fraction of a target reached, capped at 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

fn ratio(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (value / target).min(1.0)
}

/// Progress of a day's totals against a plan.
pub fn progress_against(totals: &Nutrients, plan: &PlanResult) -> Progress {
    Progress {
        kcal: ratio(totals.kcal, plan.target_kcal),
        protein: ratio(totals.macros.protein_g, plan.macros.protein_g),
        carbs: ratio(totals.macros.carb_g, plan.macros.carb_g),
        fat: ratio(totals.macros.fat_g, plan.macros.fat_g),
    }
}
