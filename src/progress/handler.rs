//! Status handler trait and events

use crate::toolchain::ToolchainId;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// One decision point in a run
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    RunStarted {
        repo_root: PathBuf,
        output_root: PathBuf,
    },

    Detected {
        toolchain: ToolchainId,
        /// Set when the only evidence is an installed generator
        via_tool: bool,
    },

    NotDetected { toolchain: ToolchainId },

    /// Excluded by operator selection
    Skipped { toolchain: ToolchainId },

    Available {
        toolchain: ToolchainId,
        generator: &'static str,
    },

    Unavailable {
        toolchain: ToolchainId,
        generator: &'static str,
        hint: &'static str,
    },

    MissingInput {
        toolchain: ToolchainId,
        reason: String,
    },

    Running {
        toolchain: ToolchainId,
        command_line: String,
    },

    Succeeded {
        toolchain: ToolchainId,
        output_dir: PathBuf,
        duration: Duration,
    },

    Failed {
        toolchain: ToolchainId,
        reason: String,
    },

    RunFinished {
        succeeded: usize,
        failed: usize,
        unavailable: usize,
        not_run: usize,
    },
}

/// Receives status events in the order decisions are made
pub trait StatusHandler: Send + Sync {
    fn on_status(&self, event: &StatusEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl StatusHandler for NoOpHandler {
    fn on_status(&self, _event: &StatusEvent) {}
}

/// Forwards every event to each inner handler in turn
#[derive(Clone, Default)]
pub struct CompositeHandler {
    handlers: Vec<Arc<dyn StatusHandler>>,
}

impl CompositeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handler: Arc<dyn StatusHandler>) -> Self {
        self.handlers.push(handler);
        self
    }
}

impl StatusHandler for CompositeHandler {
    fn on_status(&self, event: &StatusEvent) {
        for handler in &self.handlers {
            handler.on_status(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl StatusHandler for CountingHandler {
        fn on_status(&self, _event: &StatusEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        NoOpHandler.on_status(&StatusEvent::NotDetected {
            toolchain: ToolchainId::Go,
        });
    }

    #[test]
    fn test_composite_fans_out() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let composite = CompositeHandler::new()
            .with(Arc::new(CountingHandler {
                count: first.clone(),
            }))
            .with(Arc::new(CountingHandler {
                count: second.clone(),
            }));

        composite.on_status(&StatusEvent::Skipped {
            toolchain: ToolchainId::Java,
        });
        composite.on_status(&StatusEvent::NotDetected {
            toolchain: ToolchainId::Rust,
        });

        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }
}
