//! Tracing subscriber setup for applications built on the SDK
//!
//! The library crates only emit `tracing` events. Nothing is printed until
//! the application installs a subscriber, either here or on its own.

use std::env;

use tracing_subscriber::{fmt, EnvFilter, Registry};

pub const LOG_MODE_ENV: &str = "HUE_LOG_MODE";
pub const LOG_LEVEL_ENV: &str = "HUE_LOG_LEVEL";

/// How much to print, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingMode {
    /// No subscriber at all
    #[default]
    Silent,
    /// Compact stderr lines at `info`
    Development,
    /// Pretty multi-line output at `debug` with source locations
    Debug,
}

impl LoggingMode {
    /// Parse a `HUE_LOG_MODE` value; anything unrecognised is silent
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("development") | Some("dev") => LoggingMode::Development,
            Some("debug") => LoggingMode::Debug,
            _ => LoggingMode::Silent,
        }
    }

    fn default_level(self) -> &'static str {
        match self {
            LoggingMode::Silent => "off",
            LoggingMode::Development => "info",
            LoggingMode::Debug => "debug",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid filter directive: {0}")]
    InvalidFilter(String),
}

/// Install a global subscriber for `mode`.
///
/// # Environment Variables
///
/// - `HUE_LOG_LEVEL`: filter directives, e.g. `debug` or `hue_api=trace`
/// - `RUST_LOG`: used when `HUE_LOG_LEVEL` is unset
///
/// ```rust,no_run
/// use hue_sdk::logging::{init_logging, LoggingMode};
///
/// init_logging(LoggingMode::Development)?;
/// # Ok::<(), hue_sdk::logging::LoggingError>(())
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = || {
        env_filter(
            env::var(LOG_LEVEL_ENV).ok().as_deref(),
            env::var("RUST_LOG").ok().as_deref(),
            mode.default_level(),
        )
    };

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .with(filter()?)
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter()?)
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
    }
}

/// Pick the mode from `HUE_LOG_MODE` and install it
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = LoggingMode::from_env_value(env::var(LOG_MODE_ENV).ok().as_deref());
    init_logging(mode)
}

pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

/// `HUE_LOG_LEVEL` wins over `RUST_LOG`, which wins over the mode default
fn env_filter(
    hue_level: Option<&str>,
    rust_log: Option<&str>,
    default_level: &str,
) -> Result<EnvFilter, LoggingError> {
    let directives = hue_level.or(rust_log).unwrap_or(default_level);
    EnvFilter::try_new(directives).map_err(|e| LoggingError::InvalidFilter(format!("{}: {}", directives, e)))
}
