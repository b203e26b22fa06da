use crate::toolchain::ToolchainId;
use serde::{Deserialize, Serialize};

/// Which toolchains the repository tree shows evidence of
///
/// Produced once per run by [`ToolchainDetector`](super::ToolchainDetector)
/// and never mutated afterwards. The `doxygen` flag only records that a
/// Doxygen configuration file exists; whether a `doxygen` binary also counts
/// as evidence is decided by the Doxygen backend, since that requires a probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainEvidence {
    pub typescript: bool,
    pub python: bool,
    pub go: bool,
    pub java: bool,
    pub rust: bool,
    pub doxygen: bool,
}

impl ToolchainEvidence {
    /// Evidence with no toolchain present
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds evidence from a list of present toolchains
    pub fn from_toolchains(toolchains: &[ToolchainId]) -> Self {
        let mut evidence = Self::none();
        for id in toolchains {
            evidence.mark(*id);
        }
        evidence
    }

    pub fn has(&self, toolchain: ToolchainId) -> bool {
        match toolchain {
            ToolchainId::TypeScript => self.typescript,
            ToolchainId::Python => self.python,
            ToolchainId::Go => self.go,
            ToolchainId::Java => self.java,
            ToolchainId::Rust => self.rust,
            ToolchainId::Doxygen => self.doxygen,
        }
    }

    pub(crate) fn mark(&mut self, toolchain: ToolchainId) {
        let flag = match toolchain {
            ToolchainId::TypeScript => &mut self.typescript,
            ToolchainId::Python => &mut self.python,
            ToolchainId::Go => &mut self.go,
            ToolchainId::Java => &mut self.java,
            ToolchainId::Rust => &mut self.rust,
            ToolchainId::Doxygen => &mut self.doxygen,
        };
        *flag = true;
    }

    /// Present toolchains, in canonical order
    pub fn present(&self) -> Vec<ToolchainId> {
        ToolchainId::all_variants()
            .iter()
            .copied()
            .filter(|id| self.has(*id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}
