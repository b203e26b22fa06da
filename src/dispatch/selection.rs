use crate::toolchain::ToolchainId;

/// Operator choice of which backends may run
///
/// An empty `only` list admits every toolchain; `skip` always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    only: Vec<ToolchainId>,
    skip: Vec<ToolchainId>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(only: Vec<ToolchainId>, skip: Vec<ToolchainId>) -> Self {
        Self { only, skip }
    }

    pub fn includes(&self, toolchain: ToolchainId) -> bool {
        if self.skip.contains(&toolchain) {
            return false;
        }
        self.only.is_empty() || self.only.contains(&toolchain)
    }
}
