//! Logging system configuration and initialization
//!
//! Console and optional file output through `tracing-subscriber`, with
//! plain or JSON formatting. `RUST_LOG` overrides the configured level:
//!
//! ```bash
//! # Show HTTP client internals too
//! RUST_LOG="debug,reqwest=debug,hyper=debug" job-scout --pages 2
//! ```
//!
//! Unless the level is `trace`, chatty dependencies (`reqwest`, `hyper`,
//! `html5ever`, `selectors`) are held at `warn`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::config::{LoggingConfig, defaults};

/// Keeps the non-blocking file writer alive; drop it at shutdown to flush
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Directory for log files when none is configured
pub fn get_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
        .join("job-scout")
        .join("logs")
}

/// Initialize logging with default configuration
pub fn init_logging() -> Result<LoggingGuard> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Build the filter for the configured level
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    if !config.level.to_lowercase().contains("trace") {
        for directive in ["reqwest=warn", "hyper=warn", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    Ok(filter)
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<LoggingGuard> {
    let env_filter = build_env_filter(config)?;

    let console_layer = if config.console_output {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoLocal::rfc_3339())
            .with_target(false);
        Some(if config.json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        })
    } else {
        None
    };

    let mut file_guard = None;
    let file_layer = if config.file_output {
        let log_dir = config.directory.clone().unwrap_or_else(get_log_directory);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {log_dir:?}"))?;

        let appender = match config.rotation.as_str() {
            "never" => rolling::never(&log_dir, defaults::LOG_FILE_NAME),
            _ => rolling::daily(&log_dir, defaults::LOG_FILE_NAME),
        };
        let (writer, guard) = non_blocking(appender);
        file_guard = Some(guard);

        let layer = fmt::layer()
            .with_writer(writer)
            .with_timer(ChronoLocal::rfc_3339())
            .with_ansi(false);
        Some(if config.json_format {
            layer.json().with_target(true).boxed()
        } else {
            layer.with_target(false).boxed()
        })
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(level = %config.level, file_output = config.file_output, "Logging initialized");

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
