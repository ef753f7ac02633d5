use std::path::Path;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caloria_rs::account::{ProfileEdit, account_status, apply_profile_edit};
use caloria_rs::cli::{
    CheckinCommand, Cli, Command, DiaryCommand, FastCommand, MeasureCommand, PhotosCommand,
    PlanArgs, ProfileCommand, RecipeArgs,
};
use caloria_rs::config::AppConfig;
use caloria_rs::error::{CaloriaError, Result};
use caloria_rs::export::export_plan;
use caloria_rs::foods::food_names;
use caloria_rs::interface::*;
use caloria_rs::models::{
    ActivityLevel, BodyProfile, MacroSpec, MealType, PlanInput, SavedPlan, Sex, Subscription,
};
use caloria_rs::onboarding::{OnboardingDraft, OnboardingStep, OnboardingWizard, initial_estimates};
use caloria_rs::planner::*;
use caloria_rs::recipes::{RecipeQuery, categories, gate_by_tier, load_recipes, search_recipes};
use caloria_rs::state::{
    JournalManager, RECENT_CHECKINS, RECENT_FASTING, RECENT_MEASUREMENTS, RECENT_PLANS,
    load_journal, save_journal,
};
use caloria_rs::tracking::{
    day_totals, manual_entry, measurement_deltas, new_checkin, new_fasting, new_measurement,
    progress_against, quick_entry, store_photo, weight_trend,
};
use caloria_rs::vision::{FoodDetector, estimate_entries, estimate_items, image_source};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays clean.
fn init_tracing(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "caloria_rs=debug".into()
        } else {
            "caloria_rs=info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }
    debug!(data_file = %config.data_file.display(), tier = config.plan_tier.label(), "Loaded config");

    let command = cli.command.unwrap_or_default();
    let journal_path = config.data_file.clone();

    match command {
        Command::Plan(args) => cmd_plan(&journal_path, args),
        Command::Plans => cmd_plans(&journal_path),
        Command::Onboard => cmd_onboard(&journal_path),
        Command::Diary(sub) => cmd_diary(&journal_path, sub),
        Command::Detect { image, auto, date } => cmd_detect(&config, &image, auto, date),
        Command::Checkin(sub) => cmd_checkin(&journal_path, sub),
        Command::Measure(sub) => cmd_measure(&journal_path, sub),
        Command::Fast(sub) => cmd_fast(&journal_path, sub),
        Command::Photos(sub) => cmd_photos(&config, sub),
        Command::Profile(sub) => cmd_profile(&config, sub),
        Command::Dashboard => cmd_dashboard(&journal_path),
        Command::Recipes(args) => cmd_recipes(&config, args),
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn today() -> NaiveDate {
    now().date()
}

fn open_journal(path: &Path) -> Result<JournalManager> {
    Ok(JournalManager::new(load_journal(path)?))
}

fn persist(path: &Path, manager: &JournalManager) -> Result<()> {
    save_journal(path, manager.journal())
}

/// Calculate a plan from flags, prompting for whatever is missing.
fn cmd_plan(journal_path: &Path, args: PlanArgs) -> Result<()> {
    let mut manager = open_journal(journal_path)?;
    let profile = manager.profile().cloned();

    let default_body = BodyProfile::new(
        profile.as_ref().and_then(|p| p.weight_kg).unwrap_or(75.0),
        profile.as_ref().and_then(|p| p.height_cm).unwrap_or(175.0),
        age_from_dob(profile.as_ref().and_then(|p| p.dob), today()),
        args.sex
            .or(profile.as_ref().map(|p| p.sex))
            .unwrap_or(Sex::Male),
    );
    let default_activity = args
        .activity
        .as_deref()
        .map(ActivityLevel::from_key)
        .or(profile.as_ref().map(|p| p.activity))
        .unwrap_or_default();
    let default_goal = args.goal_or(profile.as_ref().map(|p| p.goal));
    let adjustment = args.adjustment()?;
    let flag_macros = args.macro_spec()?;

    let from_flags = args.weight.is_some() && args.height.is_some() && args.age.is_some();

    let input = if from_flags {
        let body = BodyProfile::new(
            check_range("weight", args.weight.unwrap_or_default(), WEIGHT_MIN_KG, WEIGHT_MAX_KG)?,
            check_range("height", args.height.unwrap_or_default(), HEIGHT_MIN_CM, HEIGHT_MAX_CM)?,
            check_age(args.age.unwrap_or(DEFAULT_AGE_YEARS))?,
            default_body.sex,
        );
        PlanInput {
            body,
            activity: default_activity,
            goal: default_goal,
            adjustment_percent: adjustment,
            macros: flag_macros.unwrap_or(MacroSpec::Ratios {
                protein_g_per_kg: DEFAULT_PROTEIN_G_PER_KG,
                fat_g_per_kg: DEFAULT_FAT_G_PER_KG,
            }),
        }
    } else {
        let body = prompt_body(BodyProfile {
            weight_kg: args.weight.unwrap_or(default_body.weight_kg),
            height_cm: args.height.unwrap_or(default_body.height_cm),
            age_years: args.age.unwrap_or(default_body.age_years),
            sex: default_body.sex,
        })?;
        let activity = prompt_activity(default_activity)?;
        let goal = prompt_goal(default_goal)?;
        let adjustment = match adjustment {
            Some(a) => a,
            None => prompt_adjustment(goal)?,
        };
        let macros = match flag_macros {
            Some(spec) => spec,
            None => prompt_macro_spec()?,
        };
        PlanInput {
            body,
            activity,
            goal,
            adjustment_percent: Some(adjustment),
            macros,
        }
    };

    let result = build_plan_result(&input)?;
    display_plan(&result);

    if let Some(path) = &args.export {
        let format = export_plan(&input, &result, path)?;
        println!("Exported plan ({:?}) to {}", format, path.display());
    }

    if args.save {
        manager.save_plan(SavedPlan::new(now(), input, result));
        persist(journal_path, &manager)?;
        println!("Plan saved as your active target.");
    }

    Ok(())
}

fn cmd_plans(journal_path: &Path) -> Result<()> {
    let manager = open_journal(journal_path)?;
    display_saved_plans(&manager.recent_plans(RECENT_PLANS));
    Ok(())
}

/// Step through onboarding and store the profile.
fn cmd_onboard(journal_path: &Path) -> Result<()> {
    let mut manager = open_journal(journal_path)?;
    let draft = manager
        .profile()
        .map(OnboardingDraft::from_profile)
        .unwrap_or_default();
    let mut wizard = OnboardingWizard::new(draft);

    loop {
        let estimates = initial_estimates(&wizard.draft, today());
        display_onboarding_step(wizard.step, &wizard.draft, &estimates);
        prompt_onboarding_step(wizard.step, &mut wizard.draft)?;

        let is_first = wizard.step == OnboardingStep::Welcome;
        match prompt_step_action(is_first, wizard.is_last())? {
            StepAction::Next => wizard.next(),
            StepAction::Back => wizard.back(),
            StepAction::Quit => {
                println!("Onboarding not saved.");
                return Ok(());
            }
            StepAction::Finish => {
                let profile = wizard.complete()?;
                manager.set_profile(profile);
                persist(journal_path, &manager)?;
                info!("Onboarding completed");
                println!("Onboarding complete! Run 'plan --save' to set your daily targets.");
                return Ok(());
            }
        }
    }
}

fn cmd_diary(journal_path: &Path, command: DiaryCommand) -> Result<()> {
    match command {
        DiaryCommand::Add { date } => {
            let mut manager = open_journal(journal_path)?;
            let input = prompt_meal_input()?;
            let entry = manual_entry(date.unwrap_or_else(today), input, now());
            println!("Added: {}", entry.summary());
            manager.add_diary_entry(entry);
            persist(journal_path, &manager)
        }
        DiaryCommand::Quick {
            food,
            grams,
            meal,
            date,
        } => {
            let mut manager = open_journal(journal_path)?;
            let date = date.unwrap_or_else(today);
            let entry = match quick_entry(date, &food, grams, meal, now()) {
                Err(CaloriaError::EntryNotFound(_)) => {
                    let Some(name) = prompt_food_match(&food, &food_names())? else {
                        println!("Nothing logged. Use 'diary foods' to see the table.");
                        return Ok(());
                    };
                    quick_entry(date, name, grams, meal, now())?
                }
                other => other?,
            };
            println!(
                "Added: {} {:.0} g, {:.0} kcal",
                entry.description.as_deref().unwrap_or(""),
                grams,
                entry.kcal.unwrap_or_default()
            );
            manager.add_diary_entry(entry);
            persist(journal_path, &manager)
        }
        DiaryCommand::List { date } => {
            let manager = open_journal(journal_path)?;
            let date = date.unwrap_or_else(today);
            let entries = manager.entries_for(date);
            let totals = day_totals(entries.iter().copied());
            let target = manager
                .active_plan()
                .map(|plan| (plan, progress_against(&totals, plan)));
            display_day(date, &entries, &totals, target);
            Ok(())
        }
        DiaryCommand::Delete { id } => {
            let mut manager = open_journal(journal_path)?;
            let removed = manager.delete_entry(id)?;
            persist(journal_path, &manager)?;
            println!("Deleted: {}", removed.summary());
            Ok(())
        }
        DiaryCommand::Foods => {
            display_food_table();
            Ok(())
        }
    }
}

/// Detect foods in a photo and log them.
fn cmd_detect(config: &AppConfig, image: &str, auto: bool, date: Option<NaiveDate>) -> Result<()> {
    let detector = FoodDetector::new(config.ai.clone())?;
    if !detector.is_enabled() {
        println!("Photo detection is off. Set ai.enabled and ai.api_key (or CALORIA__AI__API_KEY).");
        return Ok(());
    }

    let url = image_source(image)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let detected = runtime.block_on(detector.detect(&url));

    let items = estimate_items(detected);
    display_detected(&items);
    if items.is_empty() {
        return Ok(());
    }

    let meal_type = if auto {
        MealType::AiAuto
    } else if prompt_yes_no("Save these items to the diary?", true)? {
        MealType::AiEstimate
    } else {
        println!("Nothing saved.");
        return Ok(());
    };

    let photo = (!image.starts_with("data:")).then_some(image);
    let entries = estimate_entries(&items, date.unwrap_or_else(today), meal_type, photo, now());

    let mut manager = open_journal(&config.data_file)?;
    let added = manager.add_diary_entries(entries);
    persist(&config.data_file, &manager)?;
    println!("Saved {} item(s) as {}.", added, meal_type.label());
    Ok(())
}

fn cmd_checkin(journal_path: &Path, command: CheckinCommand) -> Result<()> {
    let mut manager = open_journal(journal_path)?;
    match command {
        CheckinCommand::Add { weight, date } => {
            let weight = match weight {
                Some(w) => Some(w),
                None => {
                    let w = prompt_number("Weight (kg), 0 to skip", 0.0, 0.0, WEIGHT_MAX_KG)?;
                    (w > 0.0).then_some(w)
                }
            };
            let (scores, notes) = prompt_checkin()?;
            let checkin = new_checkin(date.unwrap_or_else(today), weight, scores, notes, now())?;
            manager.add_checkin(checkin);
            persist(journal_path, &manager)?;
            println!("Check-in saved.");
        }
        CheckinCommand::List => display_checkins(&manager.recent_checkins(RECENT_CHECKINS)),
    }
    Ok(())
}

fn cmd_measure(journal_path: &Path, command: MeasureCommand) -> Result<()> {
    let mut manager = open_journal(journal_path)?;
    match command {
        MeasureCommand::Add { date } => {
            let sites = prompt_circumferences()?;
            manager.add_measurement(new_measurement(date.unwrap_or_else(today), sites, now()));
            persist(journal_path, &manager)?;
            println!("Measurements saved.");
        }
        MeasureCommand::List => {
            let recent = manager.recent_measurements(RECENT_MEASUREMENTS);
            display_measurements(&measurement_deltas(&recent));
        }
    }
    Ok(())
}

fn cmd_fast(journal_path: &Path, command: FastCommand) -> Result<()> {
    let mut manager = open_journal(journal_path)?;
    match command {
        FastCommand::Start => {
            if let Some(open) = manager.open_fasting() {
                println!(
                    "A fast is already running since {}.",
                    open.start.format("%Y-%m-%d %H:%M")
                );
                return Ok(());
            }
            manager.add_fasting(new_fasting(now(), None)?);
            persist(journal_path, &manager)?;
            println!("Fast started.");
        }
        FastCommand::End => {
            let hours = manager.close_fasting(now())?.duration_hours();
            persist(journal_path, &manager)?;
            println!("Fast ended: {:.1} h.", hours.unwrap_or_default());
        }
        FastCommand::List => display_fasting(&manager.recent_fasting(RECENT_FASTING)),
    }
    Ok(())
}

fn cmd_photos(config: &AppConfig, command: PhotosCommand) -> Result<()> {
    let mut manager = open_journal(&config.data_file)?;
    match command {
        PhotosCommand::Add { files } => {
            let mut stored = 0;
            for file in &files {
                match store_photo(file, &config.photos_dir, now()) {
                    Ok(photo) => {
                        println!("Stored: {}", photo.path.display());
                        manager.add_photo(photo);
                        stored += 1;
                    }
                    Err(e) => eprintln!("Could not store {}: {}", file.display(), e),
                }
            }
            if stored > 0 {
                persist(&config.data_file, &manager)?;
            }
            println!("{} of {} photo(s) stored.", stored, files.len());
        }
        PhotosCommand::List => display_photos(manager.photos()),
    }
    Ok(())
}

fn cmd_profile(config: &AppConfig, command: ProfileCommand) -> Result<()> {
    let mut manager = open_journal(&config.data_file)?;
    match command {
        ProfileCommand::Show => {
            let status = account_status(config.plan_tier, manager.subscription(), today());
            display_account(manager.profile(), &status);
        }
        ProfileCommand::Edit {
            name,
            height,
            weight,
        } => {
            let mut edit = ProfileEdit {
                full_name: name,
                height_cm: height,
                weight_kg: weight,
            };
            if edit.is_empty() {
                edit = prompt_profile_edit(manager.profile())?;
            }
            let updated = apply_profile_edit(manager.profile(), &edit)?;
            manager.set_profile(updated);
            persist(&config.data_file, &manager)?;
            println!("Profile updated.");
        }
        ProfileCommand::Subscription { start, end } => {
            manager.set_subscription(Subscription::new(start, end)?);
            persist(&config.data_file, &manager)?;
            println!("Subscription saved: {} to {}.", start, end);
        }
    }
    Ok(())
}

fn cmd_dashboard(journal_path: &Path) -> Result<()> {
    let manager = open_journal(journal_path)?;
    let profile = manager.onboarded_profile()?;
    let trend = weight_trend(manager.checkins());
    display_dashboard(profile, trend.as_ref(), manager.active_plan());
    Ok(())
}

fn cmd_recipes(config: &AppConfig, args: RecipeArgs) -> Result<()> {
    let path = &config.recipes_file;
    if !path.exists() {
        eprintln!("Recipe catalog not found: {}", path.display());
        eprintln!("Set recipes_file in caloria.toml or CALORIA__RECIPES_FILE.");
        return Ok(());
    }

    let recipes = load_recipes(path)?;
    if args.list_categories {
        for category in categories(&recipes) {
            println!("{}", category);
        }
        return Ok(());
    }

    let query = RecipeQuery {
        search: args.search,
        categories: args.categories,
        quick_only: args.quick,
        sort: args.sort,
    };
    let (unlocked, locked) = gate_by_tier(search_recipes(&recipes, &query), config.plan_tier);
    display_recipes(&unlocked, &locked, config.plan_tier);
    Ok(())
}
