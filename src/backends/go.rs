//! `go doc` backend (Go)

use super::{AvailabilityProbe, DocBackend, Invocation, RecipeContext, RecipeError};
use crate::toolchain::ToolchainId;

/// File inside the output directory that receives `go doc` output
pub const GODOC_OUTPUT_FILE: &str = "godoc.txt";

/// `go doc` prints to stdout, so its output is captured into a text file.
pub struct GoDocBackend;

impl DocBackend for GoDocBackend {
    fn toolchain(&self) -> ToolchainId {
        ToolchainId::Go
    }

    fn generator(&self) -> &'static str {
        "go doc"
    }

    fn probe(&self) -> AvailabilityProbe {
        AvailabilityProbe::Binary("go")
    }

    fn install_hint(&self) -> &'static str {
        "install the Go toolchain from https://go.dev/dl/"
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError> {
        Ok(Invocation::new("go", ctx.repo_root)
            .args(["doc", "-all"])
            .capture_stdout_to(ctx.output_dir.join(GODOC_OUTPUT_FILE)))
    }
}
