use chrono::NaiveDate;

use crate::account::AccountStatus;
use crate::foods::OFFLINE_FOODS;
use crate::models::{
    Checkin, CheckinScores, Circumferences, DiaryEntry, FastingLog, Nutrients, PlanResult,
    PlanTier, Profile, ProgressPhoto, Recipe, SavedPlan,
};
use crate::tracking::photos_by_month;
use crate::onboarding::{InitialEstimates, OnboardingDraft, OnboardingStep, expectations};
use crate::tracking::{MeasurementDelta, Progress, WeightTrend};
use crate::vision::EstimatedItem;

/// Text progress bar for a 0..1 ratio.
fn bar(ratio: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (ratio.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
}

fn opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Display a computed plan.
pub fn display_plan(result: &PlanResult) {
    println!();
    println!("=== Daily Plan ===");
    println!();
    println!("BMR:          {:>6.0} kcal/day", result.bmr);
    println!("TDEE:         {:>6.0} kcal/day", result.tdee);
    println!(
        "Target:       {:>6.0} kcal/day ({:+.0}%)",
        result.target_kcal, result.adjustment_percent
    );
    println!("Water:        {:>6.2} L/day", result.water_liters());
    println!();
    println!("--- Macros ---");
    println!(
        "Protein: {:>6.1} g ({:>5.0} kcal)",
        result.macros.protein_g, result.protein_kcal
    );
    println!(
        "Carbs:   {:>6.1} g ({:>5.0} kcal)",
        result.macros.carb_g, result.carb_kcal
    );
    println!(
        "Fat:     {:>6.1} g ({:>5.0} kcal)",
        result.macros.fat_g, result.fat_kcal
    );

    for notice in &result.notices {
        println!();
        println!("! {}", notice.message());
    }
    println!();
}

pub fn display_saved_plans(plans: &[&SavedPlan]) {
    if plans.is_empty() {
        println!("No saved plans yet. Use 'plan --save' to keep one.");
        return;
    }

    println!();
    println!("=== Saved Plans ({}) ===", plans.len());
    println!();
    for plan in plans {
        let r = &plan.result;
        println!(
            "  {}  {:>5.0} kcal | P {:.0} g C {:.0} g F {:.0} g | water {:.2} L | {}",
            plan.created_at.format("%Y-%m-%d %H:%M"),
            r.target_kcal,
            r.macros.protein_g,
            r.macros.carb_g,
            r.macros.fat_g,
            r.water_liters(),
            plan.input.goal.label(),
        );
    }
    println!();
}

/// Display a diary day with totals and, when a plan exists, progress against it.
pub fn display_day(
    date: NaiveDate,
    entries: &[&DiaryEntry],
    totals: &Nutrients,
    target: Option<(&PlanResult, Progress)>,
) {
    println!();
    println!("=== Diary {} ===", date);
    println!();

    if entries.is_empty() {
        println!("No meals logged for this day.");
    } else {
        let width = entries
            .iter()
            .map(|e| e.description.as_deref().unwrap_or("").len())
            .max()
            .unwrap_or(10)
            .max(10);
        for entry in entries {
            println!(
                "  {}  {:<14} {:<width$} {:>6} g {:>6} kcal  P {:>5} C {:>5} F {:>5}  [{}]",
                entry.created_at.format("%H:%M"),
                entry.meal_type.label(),
                entry.description.as_deref().unwrap_or(""),
                opt(entry.qty_g, 0),
                opt(entry.kcal, 0),
                opt(entry.protein_g, 1),
                opt(entry.carbs_g, 1),
                opt(entry.fat_g, 1),
                entry.id.simple(),
                width = width
            );
        }
    }

    println!();
    println!("--- Totals ---");
    match target {
        Some((plan, progress)) => {
            let rows = [
                ("Calories", totals.kcal, plan.target_kcal, "kcal", progress.kcal),
                ("Protein", totals.macros.protein_g, plan.macros.protein_g, "g", progress.protein),
                ("Carbs", totals.macros.carb_g, plan.macros.carb_g, "g", progress.carbs),
                ("Fat", totals.macros.fat_g, plan.macros.fat_g, "g", progress.fat),
            ];
            for (label, value, goal, unit, ratio) in rows {
                println!(
                    "{:<9} {} {:>6.0} / {:.0} {}",
                    label,
                    bar(ratio),
                    value,
                    goal,
                    unit
                );
            }
        }
        None => {
            println!("Calories: {:.0} kcal", totals.kcal);
            println!(
                "Protein: {:.1} g | Carbs: {:.1} g | Fat: {:.1} g",
                totals.macros.protein_g, totals.macros.carb_g, totals.macros.fat_g
            );
            println!("(Save a plan with 'plan --save' to track progress.)");
        }
    }
    println!();
}

/// Display the offline food table.
pub fn display_food_table() {
    println!();
    println!("=== Offline foods (per 100 g) ===");
    println!();
    for (name, per100) in OFFLINE_FOODS.iter() {
        println!(
            "  {:<20} {:>4.0} kcal  P {:>4.1} C {:>4.1} F {:>4.1}",
            name, per100.kcal, per100.protein_g, per100.carbs_g, per100.fat_g
        );
    }
    println!();
}

/// Display detected foods with their table estimates.
pub fn display_detected(items: &[EstimatedItem]) {
    if items.is_empty() {
        println!("No foods detected (or detection is disabled).");
        return;
    }

    println!();
    println!("=== Detected foods ===");
    println!();
    for item in items {
        let d = &item.detected;
        match &item.nutrients {
            Some(n) => println!(
                "  {:<20} {:>5.0} g  conf {:.2}  {:>5.0} kcal  P {:.1} C {:.1} F {:.1}",
                d.food, d.grams, d.confidence, n.kcal, n.macros.protein_g, n.macros.carb_g, n.macros.fat_g
            ),
            None => println!(
                "  {:<20} {:>5.0} g  conf {:.2}  (not in the offline table)",
                d.food, d.grams, d.confidence
            ),
        }
    }
    println!();
}

pub fn display_checkins(checkins: &[&Checkin]) {
    if checkins.is_empty() {
        println!("No check-ins yet.");
        return;
    }

    println!();
    println!("=== Check-ins ({}) ===", checkins.len());
    println!();
    let header: Vec<String> = CheckinScores::NAMES
        .iter()
        .map(|n| format!("{:>10}", n))
        .collect();
    println!("  {:<10} {:>7} {}", "date", "kg", header.join(""));
    for c in checkins {
        let scores: Vec<String> = c.scores.values().iter().map(|v| format!("{:>10}", v)).collect();
        println!(
            "  {:<10} {:>7} {}",
            c.ref_date.to_string(),
            opt(c.weight_kg, 1),
            scores.join("")
        );
    }
    println!();
}

pub fn display_measurements(rows: &[MeasurementDelta<'_>]) {
    if rows.is_empty() {
        println!("No measurements yet.");
        return;
    }

    println!();
    println!("=== Measurements (cm, change vs previous) ===");
    println!();
    let header: Vec<String> = Circumferences::SITES
        .iter()
        .map(|s| format!("{:>14}", s))
        .collect();
    println!("  {:<10} {}", "date", header.join(""));
    for row in rows {
        let cells: Vec<String> = row
            .measurement
            .sites
            .values()
            .iter()
            .zip(row.deltas)
            .map(|(value, delta)| {
                let cell = match (value, delta) {
                    (Some(v), Some(d)) => format!("{:.1} ({:+.1})", v, d),
                    (Some(v), None) => format!("{:.1}", v),
                    (None, _) => "-".to_string(),
                };
                format!("{:>14}", cell)
            })
            .collect();
        println!("  {:<10} {}", row.measurement.ref_date.to_string(), cells.join(""));
    }
    println!();
}

pub fn display_fasting(logs: &[&FastingLog]) {
    if logs.is_empty() {
        println!("No fasting windows logged.");
        return;
    }

    println!();
    println!("=== Fasting ===");
    println!();
    for log in logs {
        let end = log
            .end
            .map(|e| e.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "in progress".to_string());
        let hours = log
            .duration_hours()
            .map(|h| format!("{:.1} h", h))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} -> {:<16}  {}",
            log.start.format("%Y-%m-%d %H:%M"),
            end,
            hours
        );
    }
    println!();
}

/// Progress photos grouped by month.
pub fn display_photos(photos: &[ProgressPhoto]) {
    if photos.is_empty() {
        println!("No progress photos yet. Add one a month with 'photos add'.");
        return;
    }

    println!();
    println!("=== Progress Photos ===");
    for (month, group) in photos_by_month(photos) {
        println!();
        println!("{}", month);
        for photo in group {
            println!("  {}  {}", photo.file_name, photo.path.display());
        }
    }
    println!();
}

/// Account page: personal data, plan status and content access.
pub fn display_account(profile: Option<&Profile>, status: &AccountStatus) {
    println!();
    println!("=== Account ===");
    println!();

    match profile {
        Some(p) => {
            println!("Name:   {}", p.full_name.as_deref().unwrap_or("-"));
            println!("Height: {} cm", opt(p.height_cm, 1));
            println!("Weight: {} kg", opt(p.weight_kg, 1));
        }
        None => println!("No profile yet. Run 'onboard' or 'profile edit'."),
    }

    println!();
    println!("Plan: {}", status.tier.label());
    match (status.subscription, status.days_remaining, status.progress) {
        (Some(sub), Some(days), Some(progress)) => {
            println!("Period: {} to {}", sub.start, sub.end);
            println!("Days remaining: {}", days);
            println!("Progress {} {:.0}%", bar(progress), progress * 100.0);
        }
        _ => println!("No active subscription (default: {}).", PlanTier::Discipulo.label()),
    }

    println!();
    if status.premium_recipes {
        println!("Premium recipes: unlocked");
    } else {
        println!("Premium recipes: locked on your current plan");
    }
    println!();
}

/// Display the progress dashboard.
pub fn display_dashboard(profile: &Profile, trend: Option<&WeightTrend>, plan: Option<&PlanResult>) {
    println!();
    println!("=== Dashboard ===");
    println!();

    if let Some(name) = &profile.full_name {
        println!("Hello, {}!", name);
    }
    println!(
        "Goal: {}{}",
        profile.goal.label(),
        profile
            .target_weight_kg
            .map(|t| format!(" (target {:.1} kg)", t))
            .unwrap_or_default()
    );

    match trend {
        Some(t) => {
            println!(
                "Weight: initial {:.1} kg | current {:.1} kg | change {:+.1} kg",
                t.initial_kg, t.current_kg, t.delta_kg
            );
            println!();
            for (date, kg) in &t.points {
                println!("  {}  {:>6.1} kg", date, kg);
            }
        }
        None => println!("No weight data yet. Add a check-in with your weight."),
    }

    if let Some(plan) = plan {
        println!();
        println!(
            "Active plan: {:.0} kcal | P {:.0} g C {:.0} g F {:.0} g | water {:.2} L",
            plan.target_kcal,
            plan.macros.protein_g,
            plan.macros.carb_g,
            plan.macros.fat_g,
            plan.water_liters()
        );
    }
    println!();
}

/// Display recipes the tier can open, then the locked ones by title only.
pub fn display_recipes(unlocked: &[&Recipe], locked: &[&Recipe], tier: PlanTier) {
    println!();
    println!("=== Recipes ({} plan) ===", tier.label());
    println!();

    if unlocked.is_empty() && locked.is_empty() {
        println!("No recipes match these filters.");
        println!();
        return;
    }

    for recipe in unlocked {
        println!(
            "* {} [{}] {} min, serves {}",
            recipe.title, recipe.category, recipe.time_min, recipe.servings
        );
        println!(
            "  {:.0} kcal | P {:.0} g C {:.0} g F {:.0} g",
            recipe.kcal, recipe.protein_g, recipe.carbs_g, recipe.fat_g
        );
        if !recipe.ingredients.is_empty() {
            println!("  Ingredients: {}", recipe.ingredients.join(", "));
        }
        for (i, step) in recipe.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
        println!();
    }

    if !locked.is_empty() {
        println!("Locked ({}), upgrade to unlock:", locked.len());
        for recipe in locked {
            println!("  - {} [{}]", recipe.title, recipe.category);
        }
        println!();
    }
}

/// Display one onboarding screen.
pub fn display_onboarding_step(step: OnboardingStep, draft: &OnboardingDraft, estimates: &InitialEstimates) {
    println!();
    println!("=== Step {}/{}: {} ===", step.number(), OnboardingStep::ALL.len(), step.title());
    println!();

    match step {
        OnboardingStep::Welcome => {
            println!("Generic diets: rigid restrictions, no context.");
            println!(
                "CalorIA: an adjustable plan, simple logging and a weekly review driven by your data."
            );
        }
        OnboardingStep::BasicData | OnboardingStep::GoalAndTarget => {}
        OnboardingStep::Estimates => display_estimates(estimates),
        OnboardingStep::Expectations => {
            let (symptoms, help) = expectations(draft.goal);
            println!("Possible symptoms: {}", symptoms);
            println!("How the app helps: {}", help);
        }
        OnboardingStep::Rating => {
            println!("Once we are in the app stores you will be able to rate us here.");
        }
        OnboardingStep::Plans => {
            println!("Monthly: full access, simple cancellation.");
            println!("Yearly:  full access at a discount.");
        }
        OnboardingStep::Obstacles => {
            println!("You have potential. Let's build this in small steps, a bit better every week.");
        }
    }
    println!();
}

pub fn display_estimates(est: &InitialEstimates) {
    println!("BMR:            {:>6.0} kcal/day", est.bmr);
    println!("TDEE:           {:>6.0} kcal/day", est.tdee);
    println!("Initial target: {:>6.0} kcal/day", est.target_kcal);
    println!("Water:          {:>6.2} L/day", est.water_liters);

    if est.weeks_to_target == 0 {
        println!();
        println!("You are already at your target. Focus on maintaining it week by week.");
        return;
    }

    println!();
    println!("Estimated time to target: ~{} weeks", est.weeks_to_target);
    for (week, kg) in est.projection.iter().enumerate() {
        println!("  week {:>3}: {:>6.1} kg", week, kg);
    }
}
