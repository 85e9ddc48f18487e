//! Runtime configuration loaded from TOML with environment overrides.

use crate::acquisition::{AcquisitionPolicy, DEFAULT_PAGE_SIZE};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`TriviaConfig::base_url`].
pub const BASE_URL_ENV: &str = "STRICTLY_TRIVIA_BASE_URL";

/// Environment variable overriding [`TriviaConfig::max_attempts`].
pub const MAX_ATTEMPTS_ENV: &str = "STRICTLY_TRIVIA_MAX_ATTEMPTS";

/// Configuration for the trivia board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Base URL of the jService-compatible provider.
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Category summaries requested per listing.
    #[serde(default = "default_page_size")]
    page_size: usize,

    /// Acquisition iteration cap. Absent means retry until the board is full.
    #[serde(default)]
    max_attempts: Option<u32>,

    /// Pause between acquisition iterations, in milliseconds.
    #[serde(default)]
    retry_delay_ms: u64,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// Upper bound for the random listing offset. Zero always lists the first page.
    #[serde(default)]
    max_offset: u32,

    /// Seed for deterministic sampling.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_base_url() -> String {
    "https://jservice.io".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            max_attempts: None,
            retry_delay_ms: 0,
            request_timeout_secs: default_request_timeout_secs(),
            max_offset: 0,
            seed: None,
        }
    }
}

impl TriviaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(base_url = %config.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise, then applies environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };

        config.with_env_overrides()
    }

    /// Applies [`BASE_URL_ENV`] and [`MAX_ATTEMPTS_ENV`] when set.
    #[instrument(skip(self))]
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            debug!(%base_url, "Overriding base URL from environment");
            self.base_url = base_url;
        }

        if let Ok(raw) = std::env::var(MAX_ATTEMPTS_ENV) {
            let attempts = raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::new(format!("{} must be a positive integer: {}", MAX_ATTEMPTS_ENV, e))
            })?;
            debug!(attempts, "Overriding max attempts from environment");
            self.max_attempts = Some(attempts);
        }

        self.validate()?;
        Ok(self)
    }

    /// Overrides the sampling seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Builds the acquisition policy described by this configuration.
    pub fn policy(&self) -> AcquisitionPolicy {
        AcquisitionPolicy {
            page_size: self.page_size,
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::new("page_size must be at least 1".to_string()));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::new("base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
