use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::models::{Goal, MacroSpec, MealType, Sex};
use crate::planner::{
    ADJUSTMENT_MAX, ADJUSTMENT_MIN, DEFAULT_FAT_G_PER_KG, DEFAULT_PERCENT_SPLIT,
    DEFAULT_PROTEIN_G_PER_KG, check_macro_spec, check_range,
};
use crate::recipes::RecipeSort;

/// CalorIA: calorie and macro planning, food diary and progress tracking.
#[derive(Parser, Debug)]
#[command(name = "caloria")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the journal JSON file (overrides the configured one).
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Path to a TOML config file (default: caloria.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate BMR, TDEE, calorie target, macros and water.
    Plan(PlanArgs),

    /// List recently saved plans.
    Plans,

    /// Walk through profile setup.
    Onboard,

    /// Food diary.
    #[command(subcommand)]
    Diary(DiaryCommand),

    /// Estimate a meal from a photo (URL or local file) and log it.
    Detect {
        /// Image URL or path to a local image.
        image: String,

        /// Save every detected item without asking.
        #[arg(long)]
        auto: bool,

        /// Diary date (default: today).
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Weekly check-ins.
    #[command(subcommand)]
    Checkin(CheckinCommand),

    /// Body measurements.
    #[command(subcommand)]
    Measure(MeasureCommand),

    /// Intermittent fasting log.
    #[command(subcommand)]
    Fast(FastCommand),

    /// Monthly progress photos.
    #[command(subcommand)]
    Photos(PhotosCommand),

    /// Account: personal data and plan status.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Weight trend and active plan overview.
    Dashboard,

    /// Browse the recipe catalog.
    Recipes(RecipeArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

/// Plan inputs; anything missing is asked for interactively.
#[derive(Args, Debug, Default, Clone)]
pub struct PlanArgs {
    /// Body weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in cm.
    #[arg(long)]
    pub height: Option<f64>,

    /// Age in years.
    #[arg(long)]
    pub age: Option<u32>,

    /// male or female.
    #[arg(long)]
    pub sex: Option<Sex>,

    /// sedentary, light, moderate, high or athlete.
    #[arg(long)]
    pub activity: Option<String>,

    /// deficit, maintenance or surplus.
    #[arg(long)]
    pub goal: Option<Goal>,

    /// Calorie adjustment in percent (-40 to 40).
    #[arg(long, allow_hyphen_values = true)]
    pub adjust: Option<f64>,

    /// Protein g/kg (ratio method).
    #[arg(long, conflicts_with_all = ["protein_pct", "carb_pct", "fat_pct"])]
    pub protein_per_kg: Option<f64>,

    /// Fat g/kg (ratio method).
    #[arg(long, conflicts_with_all = ["protein_pct", "carb_pct", "fat_pct"])]
    pub fat_per_kg: Option<f64>,

    /// Protein percent (percentage method).
    #[arg(long)]
    pub protein_pct: Option<f64>,

    /// Carb percent (percentage method).
    #[arg(long)]
    pub carb_pct: Option<f64>,

    /// Fat percent (percentage method).
    #[arg(long)]
    pub fat_pct: Option<f64>,

    /// Keep the plan as the active target.
    #[arg(long)]
    pub save: bool,

    /// Export the summary (.csv for CSV, JSON otherwise).
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl PlanArgs {
    /// `--adjust`, rejected when outside -40..=40 or not a number.
    pub fn adjustment(&self) -> Result<Option<f64>> {
        self.adjust
            .map(|a| check_range("adjustment", a, ADJUSTMENT_MIN, ADJUSTMENT_MAX))
            .transpose()
    }

    /// Macro method implied by the flags, if any were given.
    pub fn macro_spec(&self) -> Result<Option<MacroSpec>> {
        let spec = if self.protein_per_kg.is_some() || self.fat_per_kg.is_some() {
            MacroSpec::Ratios {
                protein_g_per_kg: self.protein_per_kg.unwrap_or(DEFAULT_PROTEIN_G_PER_KG),
                fat_g_per_kg: self.fat_per_kg.unwrap_or(DEFAULT_FAT_G_PER_KG),
            }
        } else if self.protein_pct.is_some() || self.carb_pct.is_some() || self.fat_pct.is_some()
        {
            let (p, c, f) = DEFAULT_PERCENT_SPLIT;
            MacroSpec::Percentages {
                protein: self.protein_pct.unwrap_or(p),
                carb: self.carb_pct.unwrap_or(c),
                fat: self.fat_pct.unwrap_or(f),
            }
        } else {
            return Ok(None);
        };
        check_macro_spec(spec).map(Some)
    }

    /// `--goal`, else the stored goal, else maintenance.
    pub fn goal_or(&self, stored: Option<Goal>) -> Goal {
        self.goal.or(stored).unwrap_or(Goal::Maintenance)
    }
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommand {
    /// Log a meal interactively.
    Add {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log a food from the offline table.
    Quick {
        /// Food name, e.g. "white rice".
        food: String,

        /// Portion in grams.
        grams: f64,

        #[arg(long, default_value = "lunch")]
        meal: MealType,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show a day's meals and totals.
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete an entry by id.
    Delete { id: uuid::Uuid },

    /// Show the offline food table.
    Foods,
}

#[derive(Subcommand, Debug)]
pub enum CheckinCommand {
    /// Record a weekly check-in.
    Add {
        /// Current weight in kg.
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show recent check-ins.
    List,
}

#[derive(Subcommand, Debug)]
pub enum MeasureCommand {
    /// Record circumferences.
    Add {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show recent measurements with changes.
    List,
}

#[derive(Subcommand, Debug)]
pub enum FastCommand {
    /// Start a fasting window now.
    Start,

    /// Close the open fasting window now.
    End,

    /// Show recent fasting windows.
    List,
}

#[derive(Subcommand, Debug)]
pub enum PhotosCommand {
    /// Store copies of PNG/JPEG photos under this month's folder.
    Add {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show stored photos grouped by month.
    List,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Personal data, plan status and content access.
    Show,

    /// Change name, height or weight; asks when no flag is given.
    Edit {
        #[arg(long)]
        name: Option<String>,

        /// Height in cm.
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kg.
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Record the paid plan window.
    Subscription {
        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RecipeArgs {
    /// Title contains (case-insensitive).
    #[arg(long)]
    pub search: Option<String>,

    /// Category filter; repeat for several.
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Only recipes of 15 minutes or less.
    #[arg(long)]
    pub quick: bool,

    /// relevance, kcal or protein.
    #[arg(long, default_value = "relevance")]
    pub sort: RecipeSort,

    /// List available categories and exit.
    #[arg(long)]
    pub list_categories: bool,
}
