use crate::detection::ToolchainEvidence;
use crate::toolchain::ToolchainId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What happened to one backend during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    NotDetected,
    Skipped,
    Unavailable { hint: String },
    MissingInput { reason: String },
    Succeeded,
    Failed { reason: String },
}

/// [`Outcome`] without its payload, for comparing runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    NotDetected,
    Skipped,
    Unavailable,
    MissingInput,
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::NotDetected => OutcomeKind::NotDetected,
            Outcome::Skipped => OutcomeKind::Skipped,
            Outcome::Unavailable { .. } => OutcomeKind::Unavailable,
            Outcome::MissingInput { .. } => OutcomeKind::MissingInput,
            Outcome::Succeeded => OutcomeKind::Succeeded,
            Outcome::Failed { .. } => OutcomeKind::Failed,
        }
    }

    /// Whether the generator was actually started
    pub fn ran(&self) -> bool {
        matches!(self, Outcome::Succeeded | Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NotDetected => write!(f, "not detected"),
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Unavailable { hint } => write!(f, "unavailable ({})", hint),
            Outcome::MissingInput { reason } => write!(f, "not run ({})", reason),
            Outcome::Succeeded => write!(f, "succeeded"),
            Outcome::Failed { reason } => write!(f, "failed ({})", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendReport {
    pub toolchain: ToolchainId,
    pub generator: String,
    pub outcome: Outcome,

    /// Present only when the generator ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl BackendReport {
    pub fn new(toolchain: ToolchainId, generator: &str, outcome: Outcome) -> Self {
        Self {
            toolchain,
            generator: generator.to_string(),
            outcome,
            output_dir: None,
            duration_ms: None,
        }
    }
}

/// Everything one run decided, in registry order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub repo_root: PathBuf,
    pub output_root: PathBuf,
    pub evidence: ToolchainEvidence,
    pub backends: Vec<BackendReport>,
}

impl RunReport {
    pub fn get(&self, toolchain: ToolchainId) -> Option<&BackendReport> {
        self.backends.iter().find(|b| b.toolchain == toolchain)
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.backends
            .iter()
            .filter(|b| b.outcome.kind() == kind)
            .count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(OutcomeKind::Succeeded)
    }

    pub fn failed(&self) -> usize {
        self.count(OutcomeKind::Failed)
    }

    pub fn unavailable(&self) -> usize {
        self.count(OutcomeKind::Unavailable)
    }

    /// Backends that never started: not detected, skipped or missing input
    pub fn not_run(&self) -> usize {
        self.count(OutcomeKind::NotDetected)
            + self.count(OutcomeKind::Skipped)
            + self.count(OutcomeKind::MissingInput)
    }

    /// Per-backend outcome kinds, for comparing two runs
    pub fn kinds(&self) -> Vec<(ToolchainId, OutcomeKind)> {
        self.backends
            .iter()
            .map(|b| (b.toolchain, b.outcome.kind()))
            .collect()
    }
}
