pub mod catalog;

pub use catalog::{
    categories, gate_by_tier, load_recipes, search_recipes, RecipeQuery, RecipeSort,
    QUICK_RECIPE_MAX_MIN,
};
