use strsim::jaro_winkler;

use crate::foods::table::OFFLINE_FOODS;
use crate::models::Per100g;

/// Minimum similarity for a fuzzy match.
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// Look up per-100 g values by name.
///
/// Exact (case-insensitive) match first, then the closest name above
/// `FUZZY_THRESHOLD`.
pub fn lookup_per_100g(name: &str) -> Option<(&'static str, Per100g)> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some((key, per100)) = OFFLINE_FOODS.get_key_value(needle.as_str()) {
        return Some((*key, *per100));
    }

    OFFLINE_FOODS
        .iter()
        .map(|(key, per100)| (*key, *per100, jaro_winkler(key, &needle)))
        .filter(|(_, _, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(key, per100, _)| (key, per100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup_case_insensitive() {
        let (key, per100) = lookup_per_100g("  Banana ").unwrap();
        assert_eq!(key, "banana");
        assert_eq!(per100.kcal, 89.0);
    }

    #[test]
    fn test_fuzzy_lookup() {
        let (key, _) = lookup_per_100g("grilled chiken").unwrap();
        assert_eq!(key, "grilled chicken");
    }

    #[test]
    fn test_unknown_food() {
        assert!(lookup_per_100g("lasagna").is_none());
        assert!(lookup_per_100g("").is_none());
    }

    #[test]
    fn test_scaled_portion() {
        let (_, per100) = lookup_per_100g("rolled oats").unwrap();
        let n = per100.scale(50.0);
        assert!((n.kcal - 194.5).abs() < 1e-9);
        assert!((n.macros.carb_g - 33.0).abs() < 1e-9);
    }
}
