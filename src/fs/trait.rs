//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Options controlling a recursive file walk
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Maximum directory depth below the walk root (root entries are depth 1)
    pub max_depth: usize,

    /// Directory names that are never descended into, wherever they appear
    pub excluded_dirs: Vec<String>,

    /// Absolute paths that are never descended into
    pub excluded_paths: Vec<PathBuf>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: 32,
            excluded_dirs: Vec::new(),
            excluded_paths: Vec::new(),
        }
    }
}

impl WalkOptions {
    pub fn is_excluded_dir_name(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    pub fn is_excluded_path(&self, path: &Path) -> bool {
        self.excluded_paths.iter().any(|p| path.starts_with(p))
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Lazily yield every regular file below `root`.
    ///
    /// Callers may stop consuming at any point; implementations must not do
    /// work ahead of the consumer beyond what the underlying walker buffers.
    fn walk_files<'a>(
        &'a self,
        root: &Path,
        options: &WalkOptions,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_options_default() {
        let options = WalkOptions::default();
        assert_eq!(options.max_depth, 32);
        assert!(options.excluded_dirs.is_empty());
    }

    #[test]
    fn test_walk_options_exclusions() {
        let options = WalkOptions {
            max_depth: 4,
            excluded_dirs: vec!["node_modules".to_string()],
            excluded_paths: vec![PathBuf::from("/repo/docs/api")],
        };

        assert!(options.is_excluded_dir_name("node_modules"));
        assert!(!options.is_excluded_dir_name("src"));
        assert!(options.is_excluded_path(Path::new("/repo/docs/api/rust")));
        assert!(!options.is_excluded_path(Path::new("/repo/docs/guide")));
    }
}
