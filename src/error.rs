//! Fatal orchestrator errors
//!
//! Only failures that make a run impossible live here. Anything that goes wrong
//! inside a single backend is turned into an [`Outcome`](crate::dispatch::Outcome)
//! instead and never reaches this type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolydocError {
    /// The orchestrator could not locate its own executable
    #[error("Failed to locate orchestrator entry point: {0}")]
    EntryPoint(#[source] std::io::Error),

    /// The entry point has no parent directory to walk up from
    #[error("Entry point has no parent directory: {}", .0.display())]
    EntryPointWithoutParent(PathBuf),

    #[error("Repository root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Repository root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Failed to canonicalize repository root {}: {reason}", path.display())]
    Canonicalize { path: PathBuf, reason: String },

    /// The common output root could not be created
    #[error("Failed to create output root {}: {source}", path.display())]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output root is the repository root or one of its ancestors
    #[error(
        "Output root {} must not contain the repository root {}",
        output_root.display(),
        repo_root.display()
    )]
    OutputRootContainsRepo {
        output_root: PathBuf,
        repo_root: PathBuf,
    },
}

impl PolydocError {
    /// Process exit code for a fatal error
    pub fn exit_code(&self) -> i32 {
        1
    }
}
