//! pdoc backend (Python)

use super::{AvailabilityProbe, DocBackend, Invocation, RecipeContext, RecipeError};
use crate::toolchain::ToolchainId;

pub struct PdocBackend;

impl DocBackend for PdocBackend {
    fn toolchain(&self) -> ToolchainId {
        ToolchainId::Python
    }

    fn generator(&self) -> &'static str {
        "pdoc"
    }

    fn probe(&self) -> AvailabilityProbe {
        AvailabilityProbe::Command {
            program: "python3",
            args: &["-c", "import pdoc"],
        }
    }

    fn install_hint(&self) -> &'static str {
        "install pdoc with `python3 -m pip install pdoc`"
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError> {
        Ok(Invocation::new("python3", ctx.repo_root)
            .args(["-m", "pdoc", "--output-directory"])
            .arg(ctx.output_dir)
            .arg(ctx.repo_root))
    }
}
