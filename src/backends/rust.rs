//! `cargo doc` backend (Rust)

use super::{AvailabilityProbe, DocBackend, Invocation, RecipeContext, RecipeError};
use crate::toolchain::ToolchainId;

/// The output directory doubles as cargo's target directory, so the rendered
/// docs end up under `<out>/doc` next to cargo's build cache.
pub struct CargoDocBackend;

impl DocBackend for CargoDocBackend {
    fn toolchain(&self) -> ToolchainId {
        ToolchainId::Rust
    }

    fn generator(&self) -> &'static str {
        "cargo doc"
    }

    fn probe(&self) -> AvailabilityProbe {
        AvailabilityProbe::Binary("cargo")
    }

    fn install_hint(&self) -> &'static str {
        "install Rust with rustup from https://rustup.rs/"
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError> {
        Ok(Invocation::new("cargo", ctx.repo_root)
            .args(["doc", "--no-deps", "--target-dir"])
            .arg(ctx.output_dir))
    }
}
