//! Doxygen backend
//!
//! Doxygen is detected when the repository carries a `Doxyfile` or when a
//! `doxygen` binary is installed, but it only runs when the `Doxyfile`
//! exists: the config file is the generator's real input. A detected and
//! installed Doxygen without config is reported as missing input.

use super::{AvailabilityProbe, DocBackend, Invocation, RecipeContext, RecipeError};
use crate::toolchain::ToolchainId;

pub const DOXYFILE: &str = "Doxyfile";

pub struct DoxygenBackend;

impl DoxygenBackend {
    /// The repository's Doxyfile with the output directory redirected into
    /// the polydoc output tree. Later assignments win in Doxygen config, so
    /// appending is enough.
    fn effective_config(&self, ctx: &RecipeContext<'_>) -> Result<String, RecipeError> {
        let path = ctx.repo_root.join(DOXYFILE);
        let mut config = ctx.fs.read_to_string(&path).map_err(|e| RecipeError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if !config.is_empty() && !config.ends_with('\n') {
            config.push('\n');
        }
        config.push_str(&format!(
            "OUTPUT_DIRECTORY = \"{}\"\n",
            ctx.output_dir.display()
        ));
        Ok(config)
    }
}

impl DocBackend for DoxygenBackend {
    fn toolchain(&self) -> ToolchainId {
        ToolchainId::Doxygen
    }

    fn generator(&self) -> &'static str {
        "Doxygen"
    }

    fn probe(&self) -> AvailabilityProbe {
        AvailabilityProbe::Binary("doxygen")
    }

    fn install_hint(&self) -> &'static str {
        "install Doxygen from https://www.doxygen.nl/download.html or your package manager"
    }

    fn tool_presence_is_evidence(&self) -> bool {
        true
    }

    fn missing_input(&self, ctx: &RecipeContext<'_>) -> Option<String> {
        if ctx.fs.is_file(&ctx.repo_root.join(DOXYFILE)) {
            None
        } else {
            Some(format!("no {} at repository root", DOXYFILE))
        }
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError> {
        let config = self.effective_config(ctx)?;
        Ok(Invocation::new("doxygen", ctx.repo_root)
            .arg("-")
            .with_stdin(config))
    }
}
