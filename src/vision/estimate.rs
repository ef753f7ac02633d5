use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::parse::DetectedFood;
use crate::foods::lookup_per_100g;
use crate::models::{DiaryEntry, MealType, Nutrients};

/// A detected food joined with the offline nutrition table.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedItem {
    pub detected: DetectedFood,
    /// Table name matched, if any.
    pub matched: Option<&'static str>,
    /// Nutrients for the detected portion; `None` when the food is unknown.
    pub nutrients: Option<Nutrients>,
}

pub fn estimate_items(detected: Vec<DetectedFood>) -> Vec<EstimatedItem> {
    detected
        .into_iter()
        .map(|d| match lookup_per_100g(&d.food) {
            Some((name, per100)) => EstimatedItem {
                nutrients: Some(per100.scale(d.grams)),
                matched: Some(name),
                detected: d,
            },
            None => EstimatedItem {
                detected: d,
                matched: None,
                nutrients: None,
            },
        })
        .collect()
}

/// Diary rows for estimated items. Unknown foods keep only their grams.
pub fn estimate_entries(
    items: &[EstimatedItem],
    ref_date: NaiveDate,
    meal_type: MealType,
    photo_path: Option<&str>,
    now: NaiveDateTime,
) -> Vec<DiaryEntry> {
    items
        .iter()
        .map(|item| {
            let n = item.nutrients.as_ref();
            DiaryEntry {
                id: Uuid::new_v4(),
                ref_date,
                meal_type,
                description: Some(item.detected.food.clone()),
                qty_g: Some(item.detected.grams),
                kcal: n.map(|n| n.kcal),
                protein_g: n.map(|n| n.macros.protein_g),
                carbs_g: n.map(|n| n.macros.carb_g),
                fat_g: n.map(|n| n.macros.fat_g),
                photo_path: photo_path.map(str::to_string),
                created_at: now,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;

    fn detected(food: &str, grams: f64) -> DetectedFood {
        DetectedFood {
            food: food.to_string(),
            grams,
            confidence: 0.7,
        }
    }

    #[test]
    fn test_known_and_unknown_foods() {
        let items = estimate_items(vec![detected("white rice", 200.0), detected("lasagna", 300.0)]);
        assert_eq!(items[0].matched, Some("white rice"));
        let rice = items[0].nutrients.unwrap();
        assert_float_absolute_eq!(rice.kcal, 260.0, 1e-9);
        assert!(items[1].nutrients.is_none());

        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let now = date.and_hms_opt(12, 30, 0).unwrap();
        let entries = estimate_entries(&items, date, MealType::AiEstimate, Some("meal.jpg"), now);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].meal_type, MealType::AiEstimate);
        assert_eq!(entries[0].photo_path.as_deref(), Some("meal.jpg"));
        assert_eq!(entries[1].qty_g, Some(300.0));
        assert_eq!(entries[1].kcal, None);
        assert_eq!(entries[1].description.as_deref(), Some("lasagna"));
    }
}
