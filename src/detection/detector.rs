use super::rules::{default_rules, EvidenceRule, DEFAULT_EXCLUDED_DIRS};
use super::ToolchainEvidence;
use crate::fs::{FileSystem, WalkOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub max_depth: usize,
    pub excluded_dirs: Vec<String>,

    /// Absolute paths skipped by the walk, typically the output root
    pub excluded_paths: Vec<PathBuf>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            excluded_paths: Vec::new(),
        }
    }
}

/// Computes [`ToolchainEvidence`] for a repository tree
///
/// Detection never runs external commands. Root markers are checked first;
/// the remaining extension rules share one lazy walk that stops as soon as
/// every one of them has fired.
pub struct ToolchainDetector {
    fs: Arc<dyn FileSystem>,
    rules: &'static [EvidenceRule],
    config: DetectorConfig,
}

impl ToolchainDetector {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            rules: default_rules(),
            config: DetectorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn detect(&self, repo_root: &Path) -> ToolchainEvidence {
        let start = Instant::now();
        let mut evidence = ToolchainEvidence::none();

        for rule in self.rules {
            if self.has_root_marker(repo_root, rule) {
                debug!(toolchain = %rule.toolchain, "Root marker found");
                evidence.mark(rule.toolchain);
            }
        }

        let mut pending: Vec<&EvidenceRule> = self
            .rules
            .iter()
            .filter(|rule| rule.needs_walk() && !evidence.has(rule.toolchain))
            .collect();

        let mut files_scanned = 0usize;
        if !pending.is_empty() {
            let options = WalkOptions {
                max_depth: self.config.max_depth,
                excluded_dirs: self.config.excluded_dirs.clone(),
                excluded_paths: self.config.excluded_paths.clone(),
            };

            for path in self.fs.walk_files(repo_root, &options) {
                files_scanned += 1;
                let relative = path.strip_prefix(repo_root).unwrap_or(&path);

                pending.retain(|rule| {
                    if rule.matches_file(relative) {
                        debug!(
                            toolchain = %rule.toolchain,
                            path = %relative.display(),
                            "Source file found"
                        );
                        evidence.mark(rule.toolchain);
                        false
                    } else {
                        true
                    }
                });

                if pending.is_empty() {
                    break;
                }
            }
        }

        info!(
            detected = ?evidence.present(),
            files_scanned,
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Toolchain detection completed"
        );

        evidence
    }

    fn has_root_marker(&self, repo_root: &Path, rule: &EvidenceRule) -> bool {
        rule.root_files
            .iter()
            .any(|name| self.fs.is_file(&repo_root.join(name)))
            || rule
                .root_dirs
                .iter()
                .any(|name| self.fs.is_dir(&repo_root.join(name)))
    }
}
