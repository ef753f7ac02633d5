//! Configuration for the caloria CLI
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config file (`caloria.toml`, or the path given with `--config`)
//! 3. Environment variables (prefix: CALORIA__)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::PlanTier;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "caloria.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Journal JSON file.
    pub data_file: PathBuf,
    /// Recipe catalog JSON file.
    pub recipes_file: PathBuf,
    /// Folder that receives copies of progress photos.
    pub photos_dir: PathBuf,
    #[serde(default)]
    pub plan_tier: PlanTier,
    #[serde(default)]
    pub ai: AiConfig,
}

/// Photo detection service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            model: "openai/gpt-4o-mini".to_string(),
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            timeout_secs: 45,
        }
    }
}

impl AiConfig {
    /// Detection runs only when enabled and a key is present.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("caloria_journal.json"),
            recipes_file: PathBuf::from("recipes.json"),
            photos_dir: PathBuf::from("progress_photos"),
            plan_tier: PlanTier::default(),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file and the environment.
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. `path`, or `caloria.toml` when absent (optional either way)
    /// 3. Environment variables with CALORIA__ prefix
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from(file).required(path.is_some()))
            // e.g., CALORIA__AI__API_KEY=... sets ai.api_key
            .add_source(config::Environment::with_prefix("CALORIA").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_file, PathBuf::from("caloria_journal.json"));
        assert_eq!(config.plan_tier, PlanTier::Discipulo);
        assert_eq!(config.photos_dir, PathBuf::from("progress_photos"));
        assert!(!config.ai.enabled);
        assert_eq!(config.ai.timeout_secs, 45);
    }

    #[test]
    fn test_ai_needs_key() {
        let mut ai = AiConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(!ai.is_usable());
        ai.api_key = "sk-test".to_string();
        assert!(ai.is_usable());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "plan_tier = \"fiel\"\n[ai]\nenabled = true\nmodel = \"test/model\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.plan_tier, PlanTier::Fiel);
        assert!(config.ai.enabled);
        assert_eq!(config.ai.model, "test/model");
        assert_eq!(config.ai.timeout_secs, 45);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = AppConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }
}
