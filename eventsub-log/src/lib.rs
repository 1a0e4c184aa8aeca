//! EventSub Logging
//!
//! Installs a `tracing` subscriber configured from `EVENTSUB_*` environment
//! variables. Every crate in the workspace logs through the `tracing`
//! macros with structured fields; this crate only decides where the records
//! go and how they look.
//!
//! # Usage
//!
//! ```rust
//! eventsub_log::init();
//!
//! tracing::info!(subscription_id = "f1c2a387", "Subscription created");
//! ```
//!
//! # Environment Variables
//!
//! - `EVENTSUB_DEBUG=1` - Enable debug logging
//! - `EVENTSUB_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `EVENTSUB_LOG_FORMAT=pretty|json|compact` - Set output format (default `json`)
//! - `EVENTSUB_LOG_COLOR=1|0` - Enable/disable colors
//! - `EVENTSUB_LOG_TARGET=1|0` - Include the module path of each record
//!
//! `RUST_LOG`, when set, takes precedence over the level.

use once_cell::sync::Lazy;
use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of records to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// No logging
    Off,
}

impl Level {
    /// Parse a level name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Filter directive for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line human readable output
    Pretty,
    /// Single-line human readable output
    Compact,
    /// One JSON object per record
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled (ignored for JSON)
    pub color: bool,
    /// Whether to include the module path
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
            target: true,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let debug = flag("EVENTSUB_DEBUG").unwrap_or(false);

        let level = lookup("EVENTSUB_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = lookup("EVENTSUB_LOG_FORMAT")
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Json);

        let color = flag("EVENTSUB_LOG_COLOR")
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        let target = flag("EVENTSUB_LOG_TARGET").unwrap_or(true);

        Self {
            debug,
            level,
            format,
            color,
            target,
        }
    }

    /// Lower the level to at least `debug`.
    pub fn verbose(mut self) -> Self {
        self.debug = true;
        if self.level > Level::Debug {
            self.level = Level::Debug;
        }
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Filter used by the subscriber. `RUST_LOG` wins when set.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Get the configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Check if debug logging is enabled.
pub fn is_debug_enabled() -> bool {
    CONFIG.debug
}

/// Install the subscriber configured from the environment.
///
/// Calling this more than once, or after another subscriber was installed,
/// has no effect.
pub fn init() {
    init_with(config());
}

/// Install a subscriber for the given configuration.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_with(config: &LogConfig) -> bool {
    let layer = match config.format {
        Format::Json => fmt::layer()
            .json()
            .with_target(config.target)
            .with_writer(std::io::stderr)
            .boxed(),
        Format::Pretty => fmt::layer()
            .pretty()
            .with_ansi(config.color)
            .with_target(config.target)
            .with_writer(std::io::stderr)
            .boxed(),
        Format::Compact => fmt::layer()
            .compact()
            .with_ansi(config.color)
            .with_target(config.target)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.filter())
        .with(layer)
        .try_init()
        .is_ok()
}

// ============================================================================
// Tests
// ============================================================================
