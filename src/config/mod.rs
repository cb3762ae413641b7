//! Configuration layer: typed settings with layered precedence (file → env).

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const LOCAL_CONFIG_BASENAME: &str = "scorta";
const ENV_PREFIX: &str = "SCORTA";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CACHE_ENTRY_LIMIT: usize = 64;
const DEFAULT_CACHE_TTL_MS: u64 = 30_000;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl SettingsError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Top-level settings for the query layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

/// Remote API endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the console API, e.g. `https://stock.example.com`.
    pub base_url: String,
    /// Per-request timeout; requests exceeding it surface `Timeout`.
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Query cache tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum cached list pages before LRU eviction.
    pub entry_limit: usize,
    /// Freshness window for a Ready entry; older entries revalidate on access.
    pub ttl_ms: u64,
    /// Quiet period coalescing keyword keystrokes into one fetch.
    pub debounce_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            entry_limit: DEFAULT_CACHE_ENTRY_LIMIT,
            ttl_ms: DEFAULT_CACHE_TTL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Structured logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base log level (trace|debug|info|warn|error).
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LoggingSettings {
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.level).unwrap_or(LevelFilter::INFO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl Settings {
    /// Load settings with layered precedence: optional `scorta.toml` in the
    /// working directory, an explicit config file, then `SCORTA_*`
    /// environment variables (e.g. `SCORTA_API__BASE_URL`).
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder =
            Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.api.base_url.trim().is_empty() {
            return Err(SettingsError::invalid("api.base_url must not be empty"));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(SettingsError::invalid(
                "api.request_timeout_secs must be at least 1",
            ));
        }
        Ok(())
    }
}
