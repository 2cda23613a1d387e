use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::converter::ConverterConfig;
use self::dictionary::DictionaryConfig;
use self::favorites::FavoritesConfig;
use self::search::SearchConfig;

pub mod converter;
pub mod dictionary;
pub mod favorites;
pub mod search;

pub use converter::HanRegion;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub search: SearchConfig,
    pub favorites: FavoritesConfig,
    pub converter: ConverterConfig,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Load a JSON profile, environment variables still take precedence.
    /// A missing file falls back to `Config::new()`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!("Config {} not found, using defaults", path.display());
            return Ok(Self::new());
        }

        tracing::info!("Loading config from {}", path.display());
        let data = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&data)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = env::var("KOTOBA_DICT_PATH") {
            self.dictionary.path = path;
        }

        if let Ok(path) = env::var("KOTOBA_FAVORITES_DB") {
            self.favorites.db_path = path;
        }

        if let Some(limit) = env_parse("KOTOBA_RESULT_LIMIT") {
            self.search.result_limit = limit;
        }

        if let Some(limit) = env_parse("KOTOBA_SUGGESTION_LIMIT") {
            self.search.suggestion_limit = limit;
        }

        if let Some(ms) = env_parse("KOTOBA_TICK_TIMEOUT_MS") {
            self.search.tick_timeout_ms = ms;
        }

        if let Some(json) = env_parse("KOTOBA_LOG_JSON") {
            self.log_json = json;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
