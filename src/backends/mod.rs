//! Documentation generator backends
//!
//! A backend pairs one toolchain with everything needed to document it: how
//! to tell whether its generator is installed, what to run, and where the
//! output goes. Backends are declarative; probing and running happen in
//! [`crate::dispatch`].

use crate::detection::ToolchainEvidence;
use crate::fs::FileSystem;
use crate::toolchain::ToolchainId;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How to tell whether a generator is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityProbe {
    /// A standalone executable that must resolve on `PATH`
    Binary(&'static str),

    /// A command that must exit successfully (package runners, module imports)
    Command {
        program: &'static str,
        args: &'static [&'static str],
    },
}

impl AvailabilityProbe {
    pub fn program(&self) -> &'static str {
        match self {
            AvailabilityProbe::Binary(program) => program,
            AvailabilityProbe::Command { program, .. } => program,
        }
    }
}

impl fmt::Display for AvailabilityProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityProbe::Binary(program) => write!(f, "{} on PATH", program),
            AvailabilityProbe::Command { program, args } => {
                write!(f, "`{}", program)?;
                for arg in args.iter() {
                    write!(f, " {}", arg)?;
                }
                write!(f, "` succeeds")
            }
        }
    }
}

/// A fully resolved generator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,

    /// Bytes written to the child's stdin, which is closed afterwards
    pub stdin: Option<String>,

    /// File that receives the child's stdout instead of the terminal
    pub stdout_capture: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            stdin: None,
            stdout_capture: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn capture_stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout_capture = Some(path.into());
        self
    }

    /// Shell-like rendering for status lines and logs
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Inputs available when a backend builds its invocation
pub struct RecipeContext<'a> {
    pub repo_root: &'a Path,
    pub output_dir: &'a Path,
    pub fs: &'a dyn FileSystem,
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("No {toolchain} sources found under {}", dir.display())]
    NoSources { toolchain: ToolchainId, dir: PathBuf },

    #[error("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
}

/// A documentation generator for one toolchain
pub trait DocBackend: Send + Sync {
    fn toolchain(&self) -> ToolchainId;

    /// Human name of the wrapped generator (e.g. "TypeDoc")
    fn generator(&self) -> &'static str;

    /// Directory name under the output root
    fn output_subdir(&self) -> &'static str {
        self.toolchain().slug()
    }

    fn probe(&self) -> AvailabilityProbe;

    /// Remediation shown when the probe fails
    fn install_hint(&self) -> &'static str;

    /// Whether the generator being installed is itself evidence of the
    /// toolchain, on top of what the tree shows
    fn tool_presence_is_evidence(&self) -> bool {
        false
    }

    fn is_evidenced(&self, evidence: &ToolchainEvidence) -> bool {
        evidence.has(self.toolchain())
    }

    /// Reason the backend cannot run even though it is detected and its
    /// generator is installed
    fn missing_input(&self, ctx: &RecipeContext<'_>) -> Option<String> {
        let _ = ctx;
        None
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError>;
}

pub mod doxygen;
pub mod go;
pub mod java;
pub mod python;
pub mod registry;
pub mod rust;
pub mod typescript;

pub use doxygen::DoxygenBackend;
pub use go::GoDocBackend;
pub use java::JavadocBackend;
pub use python::PdocBackend;
pub use registry::BackendRegistry;
pub use rust::CargoDocBackend;
pub use typescript::TypeDocBackend;
