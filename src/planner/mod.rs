pub mod calculations;
pub mod constants;
pub mod projection;
pub mod validation;

pub use calculations::{
    build_plan_result, compute_bmr, compute_target_calories, compute_tdee,
    compute_water_target_ml, macros_from_percentages, macros_from_ratios,
};
pub use constants::*;
pub use projection::{age_from_dob, projected_weights, weeks_to_target};
pub use validation::{check_age, check_macro_spec, check_range, ensure_finite};
