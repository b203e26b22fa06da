//! Evidence rules, one per toolchain
//!
//! A rule fires when any of its root markers exist, or when the tree walk
//! finds a file with one of its extensions (optionally restricted to a source
//! root below the repository root).

use crate::toolchain::ToolchainId;
use std::path::Path;

/// Directories that never contribute evidence: VCS metadata, dependency
/// caches and cargo's `target`.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
];

#[derive(Debug, Clone, Copy)]
pub struct EvidenceRule {
    pub toolchain: ToolchainId,

    /// Files whose presence at the repository root is evidence
    pub root_files: &'static [&'static str],

    /// Directories whose presence at the repository root is evidence
    pub root_dirs: &'static [&'static str],

    /// File extensions (without the dot) that count anywhere in scope
    pub extensions: &'static [&'static str],

    /// Restricts extension matches to files below this root-relative directory
    pub source_root: Option<&'static str>,
}

impl EvidenceRule {
    pub fn needs_walk(&self) -> bool {
        !self.extensions.is_empty()
    }

    /// Whether a file found by the walk satisfies this rule
    pub fn matches_file(&self, relative_path: &Path) -> bool {
        let Some(ext) = relative_path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            return false;
        }

        match self.source_root {
            Some(source_root) => relative_path.starts_with(source_root),
            None => true,
        }
    }
}

const RULES: &[EvidenceRule] = &[
    EvidenceRule {
        toolchain: ToolchainId::TypeScript,
        root_files: &[],
        root_dirs: &[],
        extensions: &["ts", "tsx"],
        source_root: None,
    },
    EvidenceRule {
        toolchain: ToolchainId::Python,
        root_files: &[],
        root_dirs: &[],
        extensions: &["py"],
        source_root: None,
    },
    EvidenceRule {
        toolchain: ToolchainId::Go,
        root_files: &["go.mod"],
        root_dirs: &["cmd"],
        extensions: &["go"],
        source_root: None,
    },
    EvidenceRule {
        toolchain: ToolchainId::Java,
        root_files: &[],
        root_dirs: &[],
        extensions: &["java"],
        source_root: Some("src"),
    },
    EvidenceRule {
        toolchain: ToolchainId::Rust,
        root_files: &["Cargo.toml"],
        root_dirs: &[],
        extensions: &["rs"],
        source_root: None,
    },
    EvidenceRule {
        toolchain: ToolchainId::Doxygen,
        root_files: &["Doxyfile"],
        root_dirs: &[],
        extensions: &[],
        source_root: None,
    },
];

/// The built-in rule table, in canonical toolchain order
pub fn default_rules() -> &'static [EvidenceRule] {
    RULES
}
