use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaloriaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("No profile saved yet; run 'onboard' first")]
    ProfileMissing,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CaloriaError>;
