//! Prefixed line reporter, the operator-facing audit trail

use super::{StatusEvent, StatusHandler};
use std::io::Write;
use std::sync::Mutex;

/// Prefix on every status line, stable so the trail can be grepped
pub const STATUS_PREFIX: &str = "[polydoc]";

/// Writes one line per status event
pub struct LineReporter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LineReporter {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }
}

/// Renders the status line for an event, without the prefix
pub fn format_event(event: &StatusEvent) -> String {
    match event {
        StatusEvent::RunStarted {
            repo_root,
            output_root,
        } => format!(
            "repository {} -> output {}",
            repo_root.display(),
            output_root.display()
        ),
        StatusEvent::Detected {
            toolchain,
            via_tool: false,
        } => format!("{}: detected", toolchain.slug()),
        StatusEvent::Detected {
            toolchain,
            via_tool: true,
        } => format!("{}: detected (generator installed)", toolchain.slug()),
        StatusEvent::NotDetected { toolchain } => format!("{}: not detected", toolchain.slug()),
        StatusEvent::Skipped { toolchain } => {
            format!("{}: skipped by selection", toolchain.slug())
        }
        StatusEvent::Available {
            toolchain,
            generator,
        } => format!("{}: {} available", toolchain.slug(), generator),
        StatusEvent::Unavailable {
            toolchain,
            generator,
            hint,
        } => format!(
            "{}: {} not available, skipping; {}",
            toolchain.slug(),
            generator,
            hint
        ),
        StatusEvent::MissingInput { toolchain, reason } => {
            format!("{}: not run, {}", toolchain.slug(), reason)
        }
        StatusEvent::Running {
            toolchain,
            command_line,
        } => format!("{}: running {}", toolchain.slug(), command_line),
        StatusEvent::Succeeded {
            toolchain,
            output_dir,
            duration,
        } => format!(
            "{}: succeeded -> {} ({:.1}s)",
            toolchain.slug(),
            output_dir.display(),
            duration.as_secs_f64()
        ),
        StatusEvent::Failed { toolchain, reason } => {
            format!("{}: failed ({}), continuing", toolchain.slug(), reason)
        }
        StatusEvent::RunFinished {
            succeeded,
            failed,
            unavailable,
            not_run,
        } => format!(
            "done: {} succeeded, {} failed, {} unavailable, {} not run",
            succeeded, failed, unavailable, not_run
        ),
    }
}

impl StatusHandler for LineReporter {
    fn on_status(&self, event: &StatusEvent) {
        let line = format_event(event);
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        // A closed stdout must not turn into a backend failure
        let _ = writeln!(writer, "{} {}", STATUS_PREFIX, line);
        let _ = writer.flush();
    }
}
