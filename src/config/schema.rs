//! Configuration schema for Forage
//!
//! Configuration is stored at `~/.config/forage/config.toml`

use crate::api::DEFAULT_BASE_URL;
use crate::config::ConfigManager;
use crate::recipe::DEFAULT_IMAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API settings
    pub api: ApiConfig,

    /// Search defaults
    pub search: SearchConfig,

    /// Query cache settings
    pub cache: CacheConfig,

    /// HTML report settings
    pub report: ReportConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Spoonacular API key
    pub key: String,

    /// Search endpoint URL
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of results to request (1-100)
    pub limit: u32,

    /// Skip typical pantry staples (water, salt, flour) when matching
    pub ignore_pantry: bool,

    /// Ingredients excluded from every search unless overridden
    pub default_exclude: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            ignore_pantry: false,
            default_exclude: vec!["plums".to_string()],
        }
    }
}

/// Query cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// SQLite database file (defaults to the state directory)
    pub db_file: Option<PathBuf>,
}

impl CacheConfig {
    /// Resolved database path.
    pub fn db_path(&self) -> PathBuf {
        self.db_file
            .clone()
            .unwrap_or_else(|| ConfigManager::state_dir().join("recipes.db"))
    }
}

/// HTML report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory where reports are written
    pub output_dir: PathBuf,

    /// Recipe image size requested from the CDN
    pub image_size: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }
}
