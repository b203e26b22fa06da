//! TypeDoc backend (TypeScript)

use super::{AvailabilityProbe, DocBackend, Invocation, RecipeContext, RecipeError};
use crate::toolchain::ToolchainId;

/// Runs TypeDoc through `npx` without letting it download anything, so only
/// a project-local or globally installed TypeDoc is used.
pub struct TypeDocBackend;

impl DocBackend for TypeDocBackend {
    fn toolchain(&self) -> ToolchainId {
        ToolchainId::TypeScript
    }

    fn generator(&self) -> &'static str {
        "TypeDoc"
    }

    fn probe(&self) -> AvailabilityProbe {
        AvailabilityProbe::Command {
            program: "npx",
            args: &["--no-install", "typedoc", "--version"],
        }
    }

    fn install_hint(&self) -> &'static str {
        "install TypeDoc with `npm install --save-dev typedoc`"
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError> {
        Ok(Invocation::new("npx", ctx.repo_root)
            .args(["--no-install", "typedoc", "--out"])
            .arg(ctx.output_dir))
    }
}
