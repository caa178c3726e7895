//! Configuration infrastructure
//!
//! Layered loading with the `config` crate:
//! 1. Built-in defaults (`#[serde(default)]` on every section)
//! 2. Optional config file (TOML/JSON/YAML, chosen by extension)
//! 3. Environment variables, e.g. `JOB_SCOUT_SCRAPER__REQUEST_TIMEOUT_SECS=8`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::parsing::config::SelectorConfig;

/// Job board URLs
pub mod indeed {
    /// Canonical origin; relative listing links are resolved against it
    pub const ORIGIN: &str = "https://www.indeed.co.uk";

    /// Search results endpoint path
    pub const SEARCH_PATH: &str = "/jobs";
}

/// Default scraping configuration values
pub mod defaults {
    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 5;

    /// Results pages fetched at the same time
    pub const MAX_CONCURRENT_PAGES: usize = 5;

    /// Detail pages resolved at the same time within one results page
    pub const MAX_CONCURRENT_LISTINGS: usize = 4;

    /// Outbound request budget shared by all workers
    pub const MAX_REQUESTS_PER_SECOND: u32 = 10;

    /// Pagination stride of the `start` query parameter
    pub const RESULTS_PER_PAGE: u32 = 10;

    /// Redirect hops followed for tracking links
    pub const MAX_REDIRECTS: usize = 10;

    pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_FILE_NAME: &str = "job-scout.log";

    pub const ENV_PREFIX: &str = "JOB_SCOUT";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub logging: LoggingConfig,
}

/// Settings for the fetch/parse pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site origin, without trailing slash
    pub origin: String,
    pub search_path: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub max_concurrent_pages: usize,
    pub max_concurrent_listings: usize,
    pub max_requests_per_second: u32,
    pub results_per_page: u32,
    pub max_redirects: usize,
    pub selectors: SelectorConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            origin: indeed::ORIGIN.to_string(),
            search_path: indeed::SEARCH_PATH.to_string(),
            user_agent: defaults::USER_AGENT.to_string(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECONDS,
            max_concurrent_pages: defaults::MAX_CONCURRENT_PAGES,
            max_concurrent_listings: defaults::MAX_CONCURRENT_LISTINGS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            results_per_page: defaults::RESULTS_PER_PAGE,
            max_redirects: defaults::MAX_REDIRECTS,
            selectors: SelectorConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Default settings pointed at a different origin (mirrors, local test servers)
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.origin).is_err() {
            return Err(invalid(format!("origin '{}' is not an absolute URL", self.origin)));
        }
        if !self.search_path.starts_with('/') {
            return Err(invalid(format!("search_path '{}' must start with '/'", self.search_path)));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs must be greater than 0"));
        }
        if self.max_concurrent_pages == 0 || self.max_concurrent_listings == 0 {
            return Err(invalid("concurrency limits must be at least 1"));
        }
        if self.max_requests_per_second == 0 {
            return Err(invalid("max_requests_per_second must be greater than 0"));
        }
        if self.results_per_page == 0 {
            return Err(invalid("results_per_page must be greater than 0"));
        }
        Ok(())
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr, so stdout stays free for exports)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for log files; defaults to the platform data directory
    pub directory: Option<PathBuf>,

    /// "daily" or "never"
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            directory: None,
            rotation: "daily".to_string(),
        }
    }
}

impl AppConfig {
    /// Load defaults, then `path` (required when given), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!("Loading configuration from: {:?}", path);
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the per-user config file when one exists
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_config_path().filter(|p| p.exists()) {
            Some(path) => Self::load(Some(&path)),
            None => Self::load(None),
        }
    }

    /// `<config dir>/job-scout/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("job-scout").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scraper.validate()?;
        match self.logging.rotation.as_str() {
            "daily" | "never" => Ok(()),
            other => Err(invalid(format!("unknown log rotation '{other}'"))),
        }
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scraper.request_timeout_secs, 5);
        assert_eq!(config.scraper.max_concurrent_pages, 5);
        assert_eq!(config.scraper.origin, "https://www.indeed.co.uk");
    }

    #[test]
    fn test_with_origin_strips_trailing_slash() {
        let config = ScraperConfig::with_origin("http://127.0.0.1:8080/");
        assert_eq!(config.origin, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_load_partial_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[scraper]
request_timeout_secs = 8
max_concurrent_pages = 2

[scraper.selectors]
company = ".employer"

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scraper.request_timeout_secs, 8);
        assert_eq!(config.scraper.max_concurrent_pages, 2);
        assert_eq!(config.scraper.selectors.company, ".employer");
        assert_eq!(config.scraper.selectors.description, "#jobDescriptionText");
        assert_eq!(config.scraper.results_per_page, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[scraper]\nmax_concurrent_pages = 0").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/job-scout.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_bad_origin_is_rejected() {
        let config = ScraperConfig {
            origin: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
