use config::{Config, ConfigError, Environment, File};
use crate::search::DEFAULT_DEBOUNCE;
use serde::Deserialize;
use std::time::Duration;

/// TheMealDB's public v1 API.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration for the explorer
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExplorerConfig {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Search pipeline settings
    #[serde(default)]
    pub search: SearchConfig,
}

/// Configuration for the remote recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL the `search.php` and `lookup.php` endpoints live under
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Configuration for the debounced search pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Quiet period in milliseconds before a query is dispatched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeExplorer/0.1)".to_string()
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

impl ExplorerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXPLORER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXPLORER__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ExplorerConfig::load`] for the source priority.
pub fn load_config() -> Result<ExplorerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_EXPLORER__SEARCH__DEBOUNCE_MS
        .add_source(
            Environment::with_prefix("RECIPE_EXPLORER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
