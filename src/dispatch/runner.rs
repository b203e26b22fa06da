//! Generator process execution

use crate::backends::Invocation;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// How a generator process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo {
    pub success: bool,
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ExitInfo {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation to completion. An `Err` means the process could
    /// not be started or fed, not that it exited unsuccessfully.
    async fn run(&self, invocation: &Invocation) -> Result<ExitInfo>;
}

/// Runs generators as child processes
///
/// Generator stdout goes to the capture file when the invocation names one
/// and to our stderr otherwise, so report output on stdout stays clean.
/// Generator stderr is inherited.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ExitInfo> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stderr(Stdio::inherit());

        if invocation.stdin.is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }

        match &invocation.stdout_capture {
            Some(path) => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                command.stdout(Stdio::from(file));
            }
            None => {
                command.stdout(Stdio::from(std::io::stderr()));
            }
        }

        debug!(command = %invocation.command_line(), "Spawning generator");
        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to start {}", invocation.program))?;

        if let Some(input) = &invocation.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                // A generator may exit without draining stdin
                match stdin.write_all(input.as_bytes()).await {
                    Ok(()) => {
                        stdin.shutdown().await.ok();
                    }
                    Err(err) => {
                        debug!(program = %invocation.program, error = %err, "Generator closed stdin early");
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", invocation.program))?;

        debug!(command = %invocation.command_line(), code = ?status.code(), "Generator exited");
        Ok(ExitInfo {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation::new("polydoc-definitely-not-installed", temp.path());
        assert!(ProcessRunner.run(&invocation).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation::new("sh", temp.path()).args(["-c", "exit 4"]);
        let exit = ProcessRunner.run(&invocation).await.unwrap();
        assert!(!exit.success);
        assert_eq!(exit.code, Some(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdin_and_stdout_capture() {
        let temp = TempDir::new().unwrap();
        let capture = temp.path().join("out.txt");
        let invocation = Invocation::new("cat", temp.path())
            .with_stdin("OUTPUT_DIRECTORY = \"x\"\n")
            .capture_stdout_to(&capture);

        let exit = ProcessRunner.run(&invocation).await.unwrap();
        assert!(exit.success);
        assert_eq!(
            std::fs::read_to_string(&capture).unwrap(),
            "OUTPUT_DIRECTORY = \"x\"\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let temp = TempDir::new().unwrap();
        let capture = temp.path().join("pwd.txt");
        let invocation = Invocation::new("pwd", temp.path()).capture_stdout_to(&capture);

        ProcessRunner.run(&invocation).await.unwrap();
        let printed = std::fs::read_to_string(&capture).unwrap();
        assert_eq!(
            std::path::Path::new(printed.trim()).canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_early_stdin_close_reports_exit_status() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation::new("sh", temp.path())
            .args(["-c", "exec 0<&-; exit 3"])
            .with_stdin("x".repeat(1024 * 1024));

        let exit = ProcessRunner.run(&invocation).await.unwrap();
        assert_eq!(exit, ExitInfo { success: false, code: Some(3) });
    }
}
