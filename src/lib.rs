pub mod account;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod foods;
pub mod interface;
pub mod models;
pub mod onboarding;
pub mod planner;
pub mod recipes;
pub mod state;
pub mod tracking;
pub mod vision;

pub use error::{CaloriaError, Result};
pub use models::{PlanInput, PlanResult};
