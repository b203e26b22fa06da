use super::outcome::{BackendReport, Outcome, OutcomeKind, RunReport};
use super::probe::{SystemProbe, ToolProbe};
use super::runner::{CommandRunner, ProcessRunner};
use super::selection::Selection;
use crate::backends::{BackendRegistry, DocBackend, RecipeContext};
use crate::detection::ToolchainEvidence;
use crate::fs::{FileSystem, RealFileSystem};
use crate::progress::{NoOpHandler, StatusEvent, StatusHandler};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// File written into every backend directory polydoc creates. Only marked
/// directories are ever emptied or removed.
pub const OUTPUT_MARKER: &str = ".polydoc-output";

/// Walks the backend registry once per run and decides, for each row,
/// whether its generator runs.
///
/// Every row yields exactly one [`BackendReport`]. Nothing a backend does can
/// stop the rows after it from being considered.
pub struct Dispatcher {
    registry: Arc<BackendRegistry>,
    fs: Arc<dyn FileSystem>,
    probe: Arc<dyn ToolProbe>,
    runner: Arc<dyn CommandRunner>,
    status: Arc<dyn StatusHandler>,
    clean_stale: bool,
}

impl Dispatcher {
    pub fn new(registry: Arc<BackendRegistry>) -> Self {
        Self {
            registry,
            fs: Arc::new(RealFileSystem),
            probe: Arc::new(SystemProbe),
            runner: Arc::new(ProcessRunner),
            status: Arc::new(NoOpHandler),
            clean_stale: true,
        }
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

    /// Remove output subdirectories left by earlier runs of backends that
    /// did not run this time
    pub fn with_clean_stale(mut self, clean_stale: bool) -> Self {
        self.clean_stale = clean_stale;
        self
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub async fn dispatch(
        &self,
        repo_root: &Path,
        output_root: &Path,
        evidence: &ToolchainEvidence,
        selection: &Selection,
    ) -> RunReport {
        let mut backends = Vec::with_capacity(self.registry.len());
        for backend in self.registry.iter() {
            let report = self
                .dispatch_one(backend.as_ref(), repo_root, output_root, evidence, selection)
                .await;
            backends.push(report);
        }

        if self.clean_stale {
            self.remove_stale_outputs(output_root, &backends);
        }

        let report = RunReport {
            repo_root: repo_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            evidence: *evidence,
            backends,
        };

        self.status.on_status(&StatusEvent::RunFinished {
            succeeded: report.succeeded(),
            failed: report.failed(),
            unavailable: report.unavailable(),
            not_run: report.not_run(),
        });

        report
    }

    async fn dispatch_one(
        &self,
        backend: &dyn DocBackend,
        repo_root: &Path,
        output_root: &Path,
        evidence: &ToolchainEvidence,
        selection: &Selection,
    ) -> BackendReport {
        let toolchain = backend.toolchain();
        let generator = backend.generator();

        if !selection.includes(toolchain) {
            self.status.on_status(&StatusEvent::Skipped { toolchain });
            return BackendReport::new(toolchain, generator, Outcome::Skipped);
        }

        let evidenced = backend.is_evidenced(evidence);
        let probe = backend.probe();
        let mut available = None;

        let detected = if evidenced {
            true
        } else if backend.tool_presence_is_evidence() {
            let installed = self.probe.is_available(&probe).await;
            available = Some(installed);
            installed
        } else {
            false
        };

        if !detected {
            self.status.on_status(&StatusEvent::NotDetected { toolchain });
            return BackendReport::new(toolchain, generator, Outcome::NotDetected);
        }

        self.status.on_status(&StatusEvent::Detected {
            toolchain,
            via_tool: !evidenced,
        });

        let available = match available {
            Some(available) => available,
            None => self.probe.is_available(&probe).await,
        };

        if !available {
            debug!(toolchain = %toolchain, probe = %probe, "Availability probe failed");
            let hint = backend.install_hint();
            self.status.on_status(&StatusEvent::Unavailable {
                toolchain,
                generator,
                hint,
            });
            return BackendReport::new(
                toolchain,
                generator,
                Outcome::Unavailable {
                    hint: hint.to_string(),
                },
            );
        }

        self.status
            .on_status(&StatusEvent::Available { toolchain, generator });

        let output_dir = output_root.join(backend.output_subdir());
        let ctx = RecipeContext {
            repo_root,
            output_dir: &output_dir,
            fs: self.fs.as_ref(),
        };

        if let Some(reason) = backend.missing_input(&ctx) {
            self.status.on_status(&StatusEvent::MissingInput {
                toolchain,
                reason: reason.clone(),
            });
            return BackendReport::new(toolchain, generator, Outcome::MissingInput { reason });
        }

        let invocation = match backend.invocation(&ctx) {
            Ok(invocation) => invocation,
            Err(err) => return self.failed(backend, err.to_string()),
        };

        if let Err(err) = prepare_output_dir(&output_dir) {
            return self.failed(
                backend,
                format!("cannot prepare {}: {}", output_dir.display(), err),
            );
        }

        self.status.on_status(&StatusEvent::Running {
            toolchain,
            command_line: invocation.command_line(),
        });

        let started = Instant::now();
        let result = self.runner.run(&invocation).await;
        let duration = started.elapsed();

        // Some generators empty their output directory before writing
        if let Err(err) = mark_output_dir(&output_dir) {
            warn!(path = %output_dir.display(), error = %err, "Failed to mark output directory");
        }

        let mut report = match result {
            Ok(exit) if exit.success => {
                self.status.on_status(&StatusEvent::Succeeded {
                    toolchain,
                    output_dir: output_dir.clone(),
                    duration,
                });
                BackendReport::new(toolchain, generator, Outcome::Succeeded)
            }
            Ok(exit) => {
                let reason = match exit.code {
                    Some(code) => format!("{} exited with status {}", generator, code),
                    None => format!("{} was terminated by a signal", generator),
                };
                self.failed(backend, reason)
            }
            Err(err) => self.failed(backend, format!("{:#}", err)),
        };

        report.output_dir = Some(output_dir);
        report.duration_ms = Some(duration.as_millis() as u64);
        report
    }

    fn failed(&self, backend: &dyn DocBackend, reason: String) -> BackendReport {
        let toolchain = backend.toolchain();
        self.status.on_status(&StatusEvent::Failed {
            toolchain,
            reason: reason.clone(),
        });
        BackendReport::new(toolchain, backend.generator(), Outcome::Failed { reason })
    }

    /// Clears subdirectories belonging to backends that were considered but
    /// wrote nothing this run. Skipped backends keep their earlier output.
    fn remove_stale_outputs(&self, output_root: &Path, reports: &[BackendReport]) {
        let stale_reports = reports
            .iter()
            .filter(|r| r.output_dir.is_none() && r.outcome.kind() != OutcomeKind::Skipped);
        for report in stale_reports {
            let Some(backend) = self.registry.get(report.toolchain) else {
                continue;
            };
            let stale = output_root.join(backend.output_subdir());
            if !stale.is_dir() {
                continue;
            }
            if !is_marked(&stale) {
                debug!(path = %stale.display(), "Leaving unmarked directory in place");
                continue;
            }
            match std::fs::remove_dir_all(&stale) {
                Ok(()) => debug!(path = %stale.display(), "Removed stale output"),
                Err(err) => warn!(path = %stale.display(), error = %err, "Failed to remove stale output"),
            }
        }
    }
}

fn is_marked(dir: &Path) -> bool {
    dir.join(OUTPUT_MARKER).is_file()
}

fn mark_output_dir(dir: &Path) -> io::Result<()> {
    std::fs::write(dir.join(OUTPUT_MARKER), "")
}

/// Empties the backend's output directory so nothing from an earlier run
/// survives next to fresh output. A non-empty directory without the marker
/// is refused.
fn prepare_output_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        if is_marked(dir) {
            std::fs::remove_dir_all(dir)?;
        } else if std::fs::read_dir(dir)?.next().is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "directory exists and was not created by polydoc",
            ));
        }
    }
    std::fs::create_dir_all(dir)?;
    mark_output_dir(dir)
}
