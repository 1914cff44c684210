use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::matrix::{self, DEFAULT_LANGUAGES, DEFAULT_VARIANTS, RetrievalAttempt, Variant};

pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Caption languages in priority order
    pub languages: Option<Vec<String>>,
    /// Track variants tried for each language, in priority order
    pub variants: Option<Vec<Variant>>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytcap/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Retrieval matrix, with `languages` overriding the configured list when non-empty
    pub fn matrix(&self, languages: &[String]) -> Vec<RetrievalAttempt> {
        let variants = self.variants.as_deref().unwrap_or(&DEFAULT_VARIANTS[..]);
        if !languages.is_empty() {
            return matrix::build(languages, variants);
        }
        match self.languages.as_deref() {
            Some(configured) => matrix::build(configured, variants),
            None => matrix::build(&DEFAULT_LANGUAGES, variants),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytcap")
        .join("config.toml")
}
