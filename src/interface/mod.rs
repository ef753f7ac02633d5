pub mod prompts;
pub mod render;

pub use prompts::{
    prompt_activity, prompt_adjustment, prompt_body, prompt_checkin, prompt_circumferences,
    prompt_date, prompt_food_match, prompt_goal, prompt_macro_spec, prompt_meal_input,
    prompt_number, prompt_onboarding_step, prompt_optional_text, prompt_profile_edit,
    prompt_select, prompt_sex,
    prompt_step_action, prompt_yes_no, StepAction,
};
pub use render::{
    display_account, display_checkins, display_dashboard, display_day, display_detected, display_estimates,
    display_fasting, display_food_table, display_measurements, display_onboarding_step,
    display_photos, display_plan, display_recipes, display_saved_plans,
};
