use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_RESULT_LIMIT;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub census: CensusSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where and how to reach the Census ACS API
#[derive(Debug, Clone, Deserialize)]
pub struct CensusSettings {
    #[serde(default = "default_census_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_census_year")]
    pub year: u16,
    #[serde(default = "default_census_dataset")]
    pub dataset: String,
    /// Optional key; the API allows a limited number of anonymous requests
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CensusSettings {
    fn default() -> Self {
        Self {
            endpoint: default_census_endpoint(),
            year: default_census_year(),
            dataset: default_census_dataset(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_census_endpoint() -> String { "https://api.census.gov".to_string() }
fn default_census_year() -> u16 { 2022 }
fn default_census_dataset() -> String { "acs/acs5".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
        }
    }
}

fn default_result_limit() -> usize { DEFAULT_RESULT_LIMIT }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// State whose places are loaded at startup
    #[serde(default = "default_state")]
    pub default_state: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_state: default_state(),
        }
    }
}

fn default_state() -> String { "CA".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "warn".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SWIPEHEIST__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SWIPEHEIST__CENSUS__API_KEY -> census.api_key
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SWIPEHEIST")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
