use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{CaloriaError, Result};
use crate::models::{PlanTier, Recipe};

/// Recipes at or under this many minutes count as quick.
pub const QUICK_RECIPE_MAX_MIN: u32 = 15;

/// Ordering of catalog results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeSort {
    /// Newest first.
    #[default]
    Relevance,
    LowestKcal,
    HighestProtein,
}

impl FromStr for RecipeSort {
    type Err = CaloriaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "relevance" | "newest" => Ok(RecipeSort::Relevance),
            "kcal" | "lowest_kcal" => Ok(RecipeSort::LowestKcal),
            "protein" | "highest_protein" => Ok(RecipeSort::HighestProtein),
            other => Err(CaloriaError::InvalidInput(format!(
                "unknown sort '{}'",
                other
            ))),
        }
    }
}

/// Filters applied to the catalog.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Allowed categories; empty means all.
    pub categories: Vec<String>,
    pub quick_only: bool,
    pub sort: RecipeSort,
}

/// Load the catalog from a JSON array.
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)?;
    Ok(recipes)
}

/// Distinct categories, sorted.
pub fn categories(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Apply a query to the catalog.
pub fn search_recipes<'a>(recipes: &'a [Recipe], query: &RecipeQuery) -> Vec<&'a Recipe> {
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut rows: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| match &needle {
            Some(n) => r.title.to_lowercase().contains(n),
            None => true,
        })
        .filter(|r| query.categories.is_empty() || query.categories.contains(&r.category))
        .filter(|r| !query.quick_only || r.time_min <= QUICK_RECIPE_MAX_MIN)
        .collect();

    match query.sort {
        RecipeSort::Relevance => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        RecipeSort::LowestKcal => rows.sort_by(|a, b| a.kcal.total_cmp(&b.kcal)),
        RecipeSort::HighestProtein => rows.sort_by(|a, b| b.protein_g.total_cmp(&a.protein_g)),
    }

    rows
}

/// Split results into (unlocked, locked) for a tier.
pub fn gate_by_tier<'a>(rows: Vec<&'a Recipe>, tier: PlanTier) -> (Vec<&'a Recipe>, Vec<&'a Recipe>) {
    let (unlocked, locked): (Vec<&Recipe>, Vec<&Recipe>) = if tier.has_full_access() {
        (rows, Vec::new())
    } else {
        rows.into_iter().partition(|r| r.free_sample)
    };
    debug!(
        tier = tier.label(),
        unlocked = unlocked.len(),
        locked = locked.len(),
        "Gated recipes"
    );
    (unlocked, locked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn recipe(title: &str, category: &str, time_min: u32, kcal: f64, protein: f64, day: u32, free: bool) -> Recipe {
        Recipe {
            title: title.to_string(),
            category: category.to_string(),
            time_min,
            servings: 1,
            kcal,
            protein_g: protein,
            carbs_g: 0.0,
            fat_g: 0.0,
            ingredients: vec![],
            steps: vec![],
            image_path: None,
            free_sample: free,
            created_at: NaiveDate::from_ymd_opt(2025, 1, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn catalog() -> Vec<Recipe> {
        vec![
            recipe("Chicken Salad", "lunch", 10, 420.0, 38.0, 1, true),
            recipe("Oat Pancakes", "breakfast", 20, 350.0, 18.0, 3, false),
            recipe("Chicken Curry", "dinner", 40, 610.0, 45.0, 2, false),
        ]
    }

    #[test]
    fn test_search_title_case_insensitive() {
        let all = catalog();
        let query = RecipeQuery {
            search: Some("CHICKEN".to_string()),
            ..Default::default()
        };
        let rows = search_recipes(&all, &query);
        assert_eq!(rows.len(), 2);
        // newest first
        assert_eq!(rows[0].title, "Chicken Curry");
    }

    #[test]
    fn test_category_and_quick_filters() {
        let all = catalog();
        let query = RecipeQuery {
            categories: vec!["lunch".to_string(), "breakfast".to_string()],
            quick_only: true,
            ..Default::default()
        };
        let rows = search_recipes(&all, &query);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Chicken Salad");
    }

    #[test]
    fn test_sorts() {
        let all = catalog();
        let by_kcal = search_recipes(
            &all,
            &RecipeQuery {
                sort: RecipeSort::LowestKcal,
                ..Default::default()
            },
        );
        assert_eq!(by_kcal[0].title, "Oat Pancakes");

        let by_protein = search_recipes(
            &all,
            &RecipeQuery {
                sort: RecipeSort::HighestProtein,
                ..Default::default()
            },
        );
        assert_eq!(by_protein[0].title, "Chicken Curry");
    }

    #[test]
    fn test_gating() {
        let all = catalog();
        let rows = search_recipes(&all, &RecipeQuery::default());

        let (unlocked, locked) = gate_by_tier(rows.clone(), PlanTier::Discipulo);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(locked.len(), 2);

        let (unlocked, locked) = gate_by_tier(rows, PlanTier::Fiel);
        assert_eq!(unlocked.len(), 3);
        assert!(locked.is_empty());
    }

    #[test]
    fn test_categories_distinct_sorted() {
        assert_eq!(categories(&catalog()), vec!["breakfast", "dinner", "lunch"]);
    }
}
