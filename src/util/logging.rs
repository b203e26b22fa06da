//! Structured logging setup for polydoc
//!
//! Diagnostic logs go through the `tracing` ecosystem and are written to
//! stderr. They are separate from the operator status trace (see
//! [`crate::progress`]), which is plain prefixed lines on stdout.
//!
//! # Features
//!
//! - Console output with pretty formatting (default)
//! - Optional JSON output for log collectors
//! - Environment-based configuration via `RUST_LOG`
//! - Thread-safe, can only be initialized once
//!
//! # Example
//!
//! ```no_run
//! use polydoc::util::logging;
//!
//! logging::init_logging(logging::config_from_env(None));
//!
//! use tracing::{debug, info};
//! info!("Starting sweep");
//! debug!(toolchain = "rust", "Probing generator");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., polydoc::dispatch) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

/// Parses a log level from a string
///
/// Falls back to `Level::INFO` (with a warning on stderr) when the string is
/// not a known level.
///
/// ```
/// use polydoc::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    let mut filter = EnvFilter::new("warn");
    if let Ok(directive) = format!("polydoc={}", level).parse() {
        filter = filter.add_directive(directive);
    }
    filter
}

/// Initializes the logging system with the provided configuration
///
/// Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

/// Builds a logging configuration from the environment, with an optional
/// level that takes precedence over `POLYDOC_LOG_LEVEL`.
pub fn config_from_env(level_override: Option<Level>) -> LoggingConfig {
    let level = level_override.unwrap_or_else(|| {
        let level_str = env::var("POLYDOC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    });

    let use_json = env::var("POLYDOC_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    // JSON output carries full metadata
    LoggingConfig {
        level,
        use_json,
        include_location: use_json,
        include_thread_ids: use_json,
        ..Default::default()
    }
}
