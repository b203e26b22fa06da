//! Backend registry

use super::DocBackend;
use crate::toolchain::ToolchainId;
use std::sync::Arc;

/// Ordered table of documentation backends
///
/// Iteration order is registration order, which `with_defaults` fixes to the
/// canonical toolchain order.
#[derive(Clone)]
pub struct BackendRegistry {
    backends: Vec<Arc<dyn DocBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for id in ToolchainId::all_variants() {
            let backend: Arc<dyn DocBackend> = match id {
                ToolchainId::TypeScript => Arc::new(super::TypeDocBackend),
                ToolchainId::Python => Arc::new(super::PdocBackend),
                ToolchainId::Go => Arc::new(super::GoDocBackend),
                ToolchainId::Java => Arc::new(super::JavadocBackend),
                ToolchainId::Rust => Arc::new(super::CargoDocBackend),
                ToolchainId::Doxygen => Arc::new(super::DoxygenBackend),
            };
            registry.register(backend);
        }
        registry
    }

    /// Adds a backend, replacing any existing row for the same toolchain in
    /// place so each toolchain keeps exactly one row.
    pub fn register(&mut self, backend: Arc<dyn DocBackend>) {
        let id = backend.toolchain();
        if let Some(slot) = self.backends.iter_mut().find(|b| b.toolchain() == id) {
            *slot = backend;
        } else {
            self.backends.push(backend);
        }
    }

    pub fn get(&self, toolchain: ToolchainId) -> Option<&dyn DocBackend> {
        self.backends
            .iter()
            .find(|b| b.toolchain() == toolchain)
            .map(|b| b.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DocBackend>> {
        self.backends.iter()
    }

    pub fn toolchains(&self) -> Vec<ToolchainId> {
        self.backends.iter().map(|b| b.toolchain()).collect()
    }

    /// Output subdirectory names of every registered backend
    pub fn output_subdirs(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.output_subdir()).collect()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
