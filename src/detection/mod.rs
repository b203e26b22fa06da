//! Toolchain detection
//!
//! Turns a repository tree into [`ToolchainEvidence`]: one flag per supported
//! toolchain. Detection is a pure function of the tree and never probes for
//! installed tools, so it can be exercised against synthetic trees.

mod detector;
mod evidence;
pub mod rules;

pub use detector::{DetectorConfig, ToolchainDetector};
pub use evidence::ToolchainEvidence;
pub use rules::{default_rules, EvidenceRule, DEFAULT_EXCLUDED_DIRS};
