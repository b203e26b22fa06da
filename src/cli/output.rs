//! Output formatting for reports, evidence and health checks
//!
//! JSON and YAML are stable serializations of the library types. The human
//! format is a small aligned table meant for a terminal.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::detection::ToolchainEvidence;
use crate::dispatch::{HealthEntry, RunReport};
use crate::toolchain::ToolchainId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

impl OutputFormat {
    pub fn is_machine_readable(&self) -> bool {
        !matches!(self, OutputFormat::Human)
    }
}

/// Detection result as printed by `polydoc detect`
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceView {
    pub repo_root: PathBuf,
    pub detected: Vec<ToolchainId>,
    pub evidence: ToolchainEvidence,
}

impl EvidenceView {
    pub fn new(repo_root: &Path, evidence: ToolchainEvidence) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            detected: evidence.present(),
            evidence,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(report, "run report"),
            OutputFormat::Yaml => to_yaml(report, "run report"),
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_evidence(&self, view: &EvidenceView) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(view, "evidence"),
            OutputFormat::Yaml => to_yaml(view, "evidence"),
            OutputFormat::Human => Ok(self.format_evidence_human(view)),
        }
    }

    pub fn format_health(&self, entries: &[HealthEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_json(&entries, "health status"),
            OutputFormat::Yaml => to_yaml(&entries, "health status"),
            OutputFormat::Human => Ok(self.format_health_human(entries)),
        }
    }

    fn format_report_human(&self, report: &RunReport) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Repository: {}", report.repo_root.display());
        let _ = writeln!(output, "Output:     {}", report.output_root.display());
        let _ = writeln!(output);

        for entry in &report.backends {
            let _ = write!(output, "  {:<12} {}", entry.toolchain.slug(), entry.outcome);
            if let Some(dir) = &entry.output_dir {
                let _ = write!(output, " -> {}", dir.display());
            }
            let _ = writeln!(output);
        }

        let _ = writeln!(output);
        let _ = write!(
            output,
            "{} succeeded, {} failed, {} unavailable, {} not run",
            report.succeeded(),
            report.failed(),
            report.unavailable(),
            report.not_run()
        );
        output
    }

    fn format_evidence_human(&self, view: &EvidenceView) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Repository: {}", view.repo_root.display());
        let _ = writeln!(output);

        for id in ToolchainId::all_variants() {
            let mark = if view.evidence.has(*id) {
                "detected"
            } else {
                "-"
            };
            let _ = writeln!(output, "  {:<12} {}", id.slug(), mark);
        }

        let _ = writeln!(output);
        if view.detected.is_empty() {
            let _ = write!(output, "No toolchains detected");
        } else {
            let names: Vec<&str> = view.detected.iter().map(|id| id.name()).collect();
            let _ = write!(output, "Detected: {}", names.join(", "));
        }
        output
    }

    fn format_health_human(&self, entries: &[HealthEntry]) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Documentation generators:");
        let _ = writeln!(output);

        for entry in entries {
            let status = if entry.available { "✓" } else { "✗" };
            let _ = writeln!(
                output,
                "  {} {:<12} {:<10} {}",
                status,
                entry.toolchain.slug(),
                entry.generator,
                entry.probe
            );
            if let Some(hint) = &entry.install_hint {
                let _ = writeln!(output, "      {}", hint);
            }
        }

        let available = entries.iter().filter(|e| e.available).count();
        let _ = writeln!(output);
        let _ = write!(output, "{}/{} generators available", available, entries.len());
        output
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {} to JSON", what))
}

fn to_yaml<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_yaml::to_string(value).with_context(|| format!("Failed to serialize {} to YAML", what))
}
