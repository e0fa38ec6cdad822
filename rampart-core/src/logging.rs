//! Logging setup for Rampart
//!
//! Rampart emits structured events through `tracing`. Applications that do
//! not install their own subscriber can call [`LogConfig::init`] once at
//! startup.
//!
//! ```no_run
//! use rampart_core::logging::*;
//!
//! LogConfig::new()
//!     .level(LogLevel::Debug)
//!     .format(LogFormat::Pretty)
//!     .init()
//!     .ok();
//!
//! info!("validation service ready");
//! ```
//!
//! The filter comes from, in order: an explicit [`LogConfig::with_env_filter`],
//! `RUST_LOG`, `RAMPART_LOG_LEVEL`, then the configured level.

use std::io;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::{debug, error, info, trace, warn};

/// Environment variable consulted when `RUST_LOG` is not set
pub const LOG_LEVEL_ENV: &str = "RAMPART_LOG_LEVEL";

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to string for EnvFilter
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured, machine-readable
    #[default]
    Json,
    /// Multi-line, for development
    Pretty,
    /// Single line, minimal
    Compact,
}

/// Output destination for logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Include target (module path)
    pub targets: bool,
    /// Custom environment filter (overrides level if set)
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            output: LogOutput::Stdout,
            targets: true,
            env_filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    /// Set a custom filter directive such as `"rampart_validation=debug"`
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Resolve the filter directive this configuration will install
    pub fn filter_directive(&self) -> String {
        if let Some(filter) = &self.env_filter {
            return filter.clone();
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            return filter;
        }
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|level| LogLevel::parse(&level))
            .unwrap_or(self.level)
            .as_str()
            .to_string()
    }

    /// Install the global subscriber.
    ///
    /// Fails if the filter directive is invalid or a global subscriber has
    /// already been installed.
    pub fn init(self) -> Result<(), crate::Error> {
        let filter = EnvFilter::try_new(self.filter_directive())
            .map_err(|e| crate::Error::Internal(format!("Invalid log filter: {}", e)))?;

        let result = match (self.format, self.output) {
            (LogFormat::Json, LogOutput::Stdout) => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(self.targets).with_writer(io::stdout))
                .try_init(),
            (LogFormat::Json, LogOutput::Stderr) => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(self.targets).with_writer(io::stderr))
                .try_init(),
            (LogFormat::Pretty, LogOutput::Stdout) => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_target(self.targets).with_writer(io::stdout))
                .try_init(),
            (LogFormat::Pretty, LogOutput::Stderr) => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_target(self.targets).with_writer(io::stderr))
                .try_init(),
            (LogFormat::Compact, LogOutput::Stdout) => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(self.targets).with_writer(io::stdout))
                .try_init(),
            (LogFormat::Compact, LogOutput::Stderr) => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(self.targets).with_writer(io::stderr))
                .try_init(),
        };

        result.map_err(|e| crate::Error::Internal(format!("Failed to install logger: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse(" error "), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.output, LogOutput::Stdout);
        assert!(config.targets);
    }

    #[test]
    fn test_explicit_filter_wins() {
        let config = LogConfig::new()
            .level(LogLevel::Error)
            .with_env_filter("rampart_validation=trace");
        assert_eq!(config.filter_directive(), "rampart_validation=trace");
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::new()
            .format(LogFormat::Compact)
            .output(LogOutput::Stderr)
            .with_targets(false);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.output, LogOutput::Stderr);
        assert!(!config.targets);
    }

    #[test]
    fn test_second_init_fails() {
        let first = LogConfig::new().with_env_filter("off").init();
        let second = LogConfig::new().with_env_filter("off").init();
        // Another test binary may already own the global subscriber.
        assert!(first.is_err() || second.is_err());
    }
}
