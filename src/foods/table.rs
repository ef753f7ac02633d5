use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::models::Per100g;

/// Offline nutrient table, per 100 g (cooked / common serving).
pub static OFFLINE_FOODS: LazyLock<BTreeMap<&'static str, Per100g>> = LazyLock::new(|| {
    let mut m = BTreeMap::new();
    m.insert("grilled chicken", Per100g::new(165.0, 31.0, 0.0, 3.6));
    m.insert("white rice", Per100g::new(130.0, 2.7, 28.0, 0.3));
    m.insert("brown rice", Per100g::new(111.0, 2.6, 23.0, 0.9));
    m.insert("cooked beans", Per100g::new(95.0, 6.0, 17.0, 0.5));
    m.insert("boiled sweet potato", Per100g::new(86.0, 1.6, 20.0, 0.1));
    m.insert("boiled egg", Per100g::new(155.0, 13.0, 1.1, 11.0));
    m.insert("rolled oats", Per100g::new(389.0, 16.9, 66.0, 6.9));
    m.insert("avocado", Per100g::new(160.0, 2.0, 9.0, 15.0));
    m.insert("banana", Per100g::new(89.0, 1.1, 23.0, 0.3));
    m.insert("french bread", Per100g::new(270.0, 9.0, 57.0, 3.0));
    m
});

/// Names in the table, sorted.
pub fn food_names() -> Vec<&'static str> {
    OFFLINE_FOODS.keys().copied().collect()
}
