pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, HealthArgs, OutputFormatArg, RunArgs};
pub use output::{EvidenceView, OutputFormat, OutputFormatter};
