use super::{FileSystem, WalkOptions};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .context(format!("Failed to canonicalize path {:?}", path))
    }

    fn walk_files<'a>(
        &'a self,
        root: &Path,
        options: &WalkOptions,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        let filter_options = options.clone();
        let walker = WalkBuilder::new(root)
            .max_depth(Some(options.max_depth))
            .hidden(false)
            .git_ignore(true)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                let excluded_name = entry
                    .file_name()
                    .to_str()
                    .map(|name| filter_options.is_excluded_dir_name(name))
                    .unwrap_or(false);
                !excluded_name && !filter_options.is_excluded_path(entry.path())
            })
            .build();

        Box::new(walker.filter_map(|result| match result {
            Ok(entry) => {
                if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    Some(entry.into_path())
                } else {
                    None
                }
            }
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                None
            }
        }))
    }
}
