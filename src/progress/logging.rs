//! Logging-based status handler

use super::{StatusEvent, StatusHandler};
use tracing::{debug, info, warn};

/// Mirrors status events into `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl StatusHandler for LoggingHandler {
    fn on_status(&self, event: &StatusEvent) {
        match event {
            StatusEvent::RunStarted {
                repo_root,
                output_root,
            } => {
                info!(
                    repo = %repo_root.display(),
                    output = %output_root.display(),
                    "Starting documentation sweep"
                );
            }
            StatusEvent::Detected {
                toolchain,
                via_tool,
            } => {
                debug!(toolchain = %toolchain, via_tool, "Toolchain detected");
            }
            StatusEvent::NotDetected { toolchain } => {
                debug!(toolchain = %toolchain, "Toolchain not detected");
            }
            StatusEvent::Skipped { toolchain } => {
                debug!(toolchain = %toolchain, "Backend skipped by selection");
            }
            StatusEvent::Available {
                toolchain,
                generator,
            } => {
                debug!(toolchain = %toolchain, generator, "Generator available");
            }
            StatusEvent::Unavailable {
                toolchain,
                generator,
                ..
            } => {
                warn!(toolchain = %toolchain, generator, "Generator not installed");
            }
            StatusEvent::MissingInput { toolchain, reason } => {
                warn!(toolchain = %toolchain, reason = %reason, "Generator input missing");
            }
            StatusEvent::Running {
                toolchain,
                command_line,
            } => {
                debug!(toolchain = %toolchain, command = %command_line, "Running generator");
            }
            StatusEvent::Succeeded {
                toolchain,
                output_dir,
                duration,
            } => {
                info!(
                    toolchain = %toolchain,
                    output = %output_dir.display(),
                    duration_ms = duration.as_millis() as u64,
                    "Generator succeeded"
                );
            }
            StatusEvent::Failed { toolchain, reason } => {
                warn!(toolchain = %toolchain, reason = %reason, "Generator failed");
            }
            StatusEvent::RunFinished {
                succeeded,
                failed,
                unavailable,
                not_run,
            } => {
                info!(
                    succeeded,
                    failed, unavailable, not_run, "Documentation sweep completed"
                );
            }
        }
    }
}
