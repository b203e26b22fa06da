//! javadoc backend (Java)

use super::{AvailabilityProbe, DocBackend, Invocation, RecipeContext, RecipeError};
use crate::detection::DEFAULT_EXCLUDED_DIRS;
use crate::fs::WalkOptions;
use crate::toolchain::ToolchainId;
use std::path::PathBuf;

/// Conventional source root that javadoc is pointed at
pub const JAVA_SOURCE_ROOT: &str = "src";

/// javadoc is handed every `.java` file under the source root explicitly,
/// which works for both Maven and plain layouts without knowing packages.
pub struct JavadocBackend;

impl JavadocBackend {
    fn source_files(&self, ctx: &RecipeContext<'_>) -> Vec<PathBuf> {
        let source_root = ctx.repo_root.join(JAVA_SOURCE_ROOT);
        let options = WalkOptions {
            max_depth: 64,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            excluded_paths: vec![ctx.output_dir.to_path_buf()],
        };

        let mut files: Vec<PathBuf> = ctx
            .fs
            .walk_files(&source_root, &options)
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("java"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    }
}

impl DocBackend for JavadocBackend {
    fn toolchain(&self) -> ToolchainId {
        ToolchainId::Java
    }

    fn generator(&self) -> &'static str {
        "javadoc"
    }

    fn probe(&self) -> AvailabilityProbe {
        AvailabilityProbe::Binary("javadoc")
    }

    fn install_hint(&self) -> &'static str {
        "install a JDK (javadoc ships with it), e.g. from https://adoptium.net/"
    }

    fn invocation(&self, ctx: &RecipeContext<'_>) -> Result<Invocation, RecipeError> {
        let sources = self.source_files(ctx);
        if sources.is_empty() {
            return Err(RecipeError::NoSources {
                toolchain: self.toolchain(),
                dir: ctx.repo_root.join(JAVA_SOURCE_ROOT),
            });
        }

        Ok(Invocation::new("javadoc", ctx.repo_root)
            .arg("-d")
            .arg(ctx.output_dir)
            .arg("-quiet")
            .args(sources))
    }
}
