//! polydoc - documentation generation orchestrator
//!
//! This library detects which language toolchains a repository contains and,
//! for each detected toolchain, runs the matching external documentation
//! generator (TypeDoc, pdoc, `go doc`, javadoc, `cargo doc`, Doxygen). All
//! generator output lands in one output tree, one subdirectory per backend.
//!
//! # Core Concepts
//!
//! - **Evidence**: filesystem facts (extensions, marker files) that show a
//!   toolchain is present. Computed once per run by a pure detector.
//! - **Backend**: a toolchain's detection rule paired with an availability
//!   probe and an invocation recipe for its generator.
//! - **Outcome**: what happened to one backend during a run. Failures are
//!   recorded, never propagated, so one broken generator never stops the rest.
//!
//! # Example Usage
//!
//! ```ignore
//! use polydoc::{Orchestrator, PolydocConfig, RootResolver, Selection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PolydocConfig::default();
//! let root = RootResolver::new().resolve()?;
//!
//! let orchestrator = Orchestrator::new(root, &config);
//! let report = orchestrator.run(&Selection::all()).await?;
//!
//! for entry in &report.backends {
//!     println!("{}: {}", entry.toolchain, entry.outcome);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`root`]: repository root resolution
//! - [`detection`]: toolchain evidence detection
//! - [`backends`]: generator backends and their registry
//! - [`dispatch`]: probing, running and outcome aggregation
//! - [`progress`]: operator-facing status trace

pub mod backends;
pub mod cli;
pub mod config;
pub mod detection;
pub mod dispatch;
pub mod error;
pub mod fs;
pub mod orchestrator;
pub mod progress;
pub mod root;
pub mod toolchain;
pub mod util;

pub use backends::{BackendRegistry, DocBackend, Invocation};
pub use config::{ConfigError, PolydocConfig};
pub use detection::{ToolchainDetector, ToolchainEvidence};
pub use dispatch::{Dispatcher, Outcome, RunReport, Selection};
pub use error::PolydocError;
pub use orchestrator::Orchestrator;
pub use root::RootResolver;
pub use toolchain::ToolchainId;
pub use util::{config_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
