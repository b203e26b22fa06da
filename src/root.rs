//! Repository root resolution
//!
//! The root never depends on the caller's working directory. An explicit root
//! wins; otherwise the resolver starts at the directory of the running
//! executable and walks up to the nearest ancestor holding a `.git` entry,
//! falling back to the parent of the executable's directory.

use crate::error::PolydocError;
use crate::fs::{FileSystem, RealFileSystem};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const VCS_MARKER: &str = ".git";

#[derive(Clone)]
pub struct RootResolver {
    explicit: Option<PathBuf>,
    entry_point: Option<PathBuf>,
    fs: Arc<dyn FileSystem>,
}

impl RootResolver {
    pub fn new() -> Self {
        Self {
            explicit: None,
            entry_point: None,
            fs: Arc::new(RealFileSystem),
        }
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_explicit(mut self, root: Option<PathBuf>) -> Self {
        self.explicit = root;
        self
    }

    /// Overrides the entry point used instead of the current executable
    pub fn with_entry_point(mut self, entry_point: impl Into<PathBuf>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    /// Returns the canonical repository root
    ///
    /// # Errors
    ///
    /// Fails when the executable cannot be located, or the candidate root is
    /// missing, not a directory, or cannot be canonicalized.
    pub fn resolve(&self) -> Result<PathBuf, PolydocError> {
        let candidate = match &self.explicit {
            Some(root) => {
                debug!(root = %root.display(), "Using explicit repository root");
                root.clone()
            }
            None => self.from_entry_point()?,
        };

        if !self.fs.exists(&candidate) {
            return Err(PolydocError::RootNotFound(candidate));
        }
        if !self.fs.is_dir(&candidate) {
            return Err(PolydocError::RootNotDirectory(candidate));
        }

        self.fs
            .canonicalize(&candidate)
            .map_err(|err| PolydocError::Canonicalize {
                path: candidate.clone(),
                reason: format!("{:#}", err),
            })
    }

    fn from_entry_point(&self) -> Result<PathBuf, PolydocError> {
        let entry = match &self.entry_point {
            Some(entry) => entry.clone(),
            None => env::current_exe().map_err(PolydocError::EntryPoint)?,
        };
        // Follow symlinks so an installed link resolves to the checkout it points into
        let entry = self.fs.canonicalize(&entry).unwrap_or(entry);

        let entry_dir = entry
            .parent()
            .ok_or_else(|| PolydocError::EntryPointWithoutParent(entry.clone()))?;

        if let Some(root) = nearest_vcs_root(self.fs.as_ref(), entry_dir) {
            debug!(root = %root.display(), "Found repository root above entry point");
            return Ok(root);
        }

        let fallback = entry_dir
            .parent()
            .ok_or_else(|| PolydocError::EntryPointWithoutParent(entry_dir.to_path_buf()))?;
        debug!(root = %fallback.display(), "No .git above entry point, using parent directory");
        Ok(fallback.to_path_buf())
    }
}

impl Default for RootResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RootResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootResolver")
            .field("explicit", &self.explicit)
            .field("entry_point", &self.entry_point)
            .finish()
    }
}

fn nearest_vcs_root(fs: &dyn FileSystem, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| fs.exists(&dir.join(VCS_MARKER)))
        .map(Path::to_path_buf)
}
