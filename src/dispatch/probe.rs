//! Generator availability probing

use crate::backends::AvailabilityProbe;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

#[async_trait]
pub trait ToolProbe: Send + Sync {
    async fn is_available(&self, probe: &AvailabilityProbe) -> bool;
}

/// Probes the real system: `PATH` lookup via `which`, command probes by
/// running them with all output discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

#[async_trait]
impl ToolProbe for SystemProbe {
    async fn is_available(&self, probe: &AvailabilityProbe) -> bool {
        let program = probe.program();
        let resolved = match which::which(program) {
            Ok(path) => path,
            Err(err) => {
                debug!(program, error = %err, "Program not found on PATH");
                return false;
            }
        };

        match probe {
            AvailabilityProbe::Binary(_) => {
                debug!(program, path = %resolved.display(), "Program found on PATH");
                true
            }
            AvailabilityProbe::Command { args, .. } => {
                let status = Command::new(&resolved)
                    .args(args.iter())
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .await;

                match status {
                    Ok(status) => {
                        debug!(program, success = status.success(), "Probe command finished");
                        status.success()
                    }
                    Err(err) => {
                        debug!(program, error = %err, "Probe command could not start");
                        false
                    }
                }
            }
        }
    }
}
