//! End-to-end run: output root, detection, dispatch

use crate::backends::BackendRegistry;
use crate::config::PolydocConfig;
use crate::detection::{DetectorConfig, ToolchainDetector, ToolchainEvidence};
use crate::dispatch::{
    CommandRunner, Dispatcher, ProcessRunner, RunReport, Selection, SystemProbe, ToolProbe,
};
use crate::error::PolydocError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::progress::{NoOpHandler, StatusEvent, StatusHandler};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub struct Orchestrator {
    repo_root: PathBuf,
    output_root: PathBuf,
    detector_config: DetectorConfig,
    clean_stale: bool,
    registry: Arc<BackendRegistry>,
    fs: Arc<dyn FileSystem>,
    probe: Arc<dyn ToolProbe>,
    runner: Arc<dyn CommandRunner>,
    status: Arc<dyn StatusHandler>,
}

impl Orchestrator {
    /// `repo_root` is expected to be already resolved and canonical
    pub fn new(repo_root: PathBuf, config: &PolydocConfig) -> Self {
        let output_root = config.output_root(&repo_root);
        let detector_config = config.detector_config(&repo_root);
        Self {
            repo_root,
            output_root,
            detector_config,
            clean_stale: config.clean_stale,
            registry: Arc::new(BackendRegistry::with_defaults()),
            fs: Arc::new(RealFileSystem),
            probe: Arc::new(SystemProbe),
            runner: Arc::new(ProcessRunner),
            status: Arc::new(NoOpHandler),
        }
    }

    pub fn with_registry(mut self, registry: BackendRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn ToolProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_status(mut self, status: Arc<dyn StatusHandler>) -> Self {
        self.status = status;
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Runs only the detector; touches nothing on disk
    pub fn detect(&self) -> ToolchainEvidence {
        ToolchainDetector::new(self.fs.clone())
            .with_config(self.detector_config.clone())
            .detect(&self.repo_root)
    }

    /// Refuses an output root that is the repository root or one of its
    /// ancestors. Such a root would hide every source file from detection
    /// and put backend directories on top of source directories.
    pub fn check_output_root(&self) -> Result<(), PolydocError> {
        let output_root = self
            .fs
            .canonicalize(&self.output_root)
            .unwrap_or_else(|_| normalize(&self.output_root));
        let repo_root = self
            .fs
            .canonicalize(&self.repo_root)
            .unwrap_or_else(|_| normalize(&self.repo_root));

        if repo_root.starts_with(&output_root) {
            return Err(PolydocError::OutputRootContainsRepo {
                output_root: self.output_root.clone(),
                repo_root: self.repo_root.clone(),
            });
        }
        Ok(())
    }

    /// Full sweep. Only an unusable output root is fatal; every backend
    /// problem ends up in the report.
    pub async fn run(&self, selection: &Selection) -> Result<RunReport, PolydocError> {
        let start = Instant::now();
        info!(
            repo_root = %self.repo_root.display(),
            output_root = %self.output_root.display(),
            "Starting documentation run"
        );

        self.status.on_status(&StatusEvent::RunStarted {
            repo_root: self.repo_root.clone(),
            output_root: self.output_root.clone(),
        });

        self.check_output_root()?;

        std::fs::create_dir_all(&self.output_root).map_err(|source| {
            PolydocError::OutputRoot {
                path: self.output_root.clone(),
                source,
            }
        })?;

        let evidence = self.detect();

        let dispatcher = Dispatcher::new(self.registry.clone())
            .with_file_system(self.fs.clone())
            .with_probe(self.probe.clone())
            .with_runner(self.runner.clone())
            .with_status(self.status.clone())
            .with_clean_stale(self.clean_stale);

        let report = dispatcher
            .dispatch(&self.repo_root, &self.output_root, &evidence, selection)
            .await;

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Documentation run complete"
        );

        Ok(report)
    }
}

/// Resolves `.` and `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
