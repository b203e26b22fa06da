//! Configuration management for polydoc
//!
//! Settings are loaded from environment variables with defaults. Command-line
//! flags are applied on top by the CLI layer.
//!
//! # Environment Variables
//!
//! - `POLYDOC_REPO_ROOT`: explicit repository root - default: resolved from the
//!   executable location
//! - `POLYDOC_OUTPUT_DIR`: output root, relative paths are joined to the
//!   repository root - default: "docs/api"
//! - `POLYDOC_MAX_DEPTH`: maximum detection walk depth - default: "32"
//! - `POLYDOC_CLEAN_STALE`: remove output of backends that did not run
//!   (true|false) - default: "true"
//! - `POLYDOC_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use polydoc::PolydocConfig;
//! use std::path::Path;
//!
//! let config = PolydocConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! let output_root = config.output_root(Path::new("/work/repo"));
//! ```

use crate::detection::{DetectorConfig, DEFAULT_EXCLUDED_DIRS};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_OUTPUT_DIR: &str = "docs/api";
pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const MAX_DEPTH_LIMIT: usize = 256;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CLEAN_STALE: bool = true;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolydocConfig {
    /// Explicit repository root, bypassing resolution from the executable
    pub repo_root: Option<PathBuf>,

    /// Output root; relative paths are taken from the repository root
    pub output_dir: PathBuf,

    /// Maximum depth of the detection walk
    pub max_depth: usize,

    pub clean_stale: bool,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for PolydocConfig {
    /// Loads from `POLYDOC_*` environment variables, falling back to defaults
    /// for anything unset or unparseable
    fn default() -> Self {
        let repo_root = env::var("POLYDOC_REPO_ROOT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let output_dir = env::var("POLYDOC_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let max_depth = env::var("POLYDOC_MAX_DEPTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_DEPTH);

        let clean_stale = env::var("POLYDOC_CLEAN_STALE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_CLEAN_STALE);

        let log_level = env::var("POLYDOC_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            repo_root,
            output_dir,
            max_depth,
            clean_stale,
            log_level,
        }
    }
}

impl PolydocConfig {
    /// Checks that:
    /// - the output directory is not empty
    /// - the walk depth is within 1..=256
    /// - the log level is valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output directory must not be empty".to_string(),
            ));
        }

        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::ValidationFailed(format!(
                "Max depth must be between 1 and {}, got {}",
                MAX_DEPTH_LIMIT, self.max_depth
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Absolute output root for a repository
    pub fn output_root(&self, repo_root: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            repo_root.join(&self.output_dir)
        }
    }

    /// Detector settings for a repository, with the output root excluded from
    /// the walk
    pub fn detector_config(&self, repo_root: &Path) -> DetectorConfig {
        DetectorConfig {
            max_depth: self.max_depth,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            excluded_paths: vec![self.output_root(repo_root)],
        }
    }
}

impl fmt::Display for PolydocConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Polydoc Configuration:")?;
        if let Some(ref root) = self.repo_root {
            writeln!(f, "  Repository Root: {}", root.display())?;
        }
        writeln!(f, "  Output Dir: {}", self.output_dir.display())?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Clean Stale: {}", self.clean_stale)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
