//! Utility modules for polydoc

pub mod logging;

pub use logging::{config_from_env, init_logging, LoggingConfig};
