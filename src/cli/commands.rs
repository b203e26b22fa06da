use crate::toolchain::ToolchainId;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Documentation generation orchestrator for polyglot repositories
#[derive(Parser, Debug)]
#[command(
    name = "polydoc",
    about = "Detect language toolchains in a repository and run their documentation generators",
    version,
    author,
    long_about = "polydoc inspects a repository for TypeScript, Python, Go, Java, Rust and \
                  Doxygen sources, then runs the matching documentation generator for each \
                  toolchain it finds (TypeDoc, pdoc, go doc, javadoc, cargo doc, Doxygen). \
                  Output lands in one tree, one subdirectory per generator. Missing or failing \
                  generators are reported and skipped; they never stop the sweep.\n\n\
                  Examples:\n  \
                  polydoc\n  \
                  polydoc --only rust,python\n  \
                  polydoc --repo ../service --format json\n  \
                  polydoc detect\n  \
                  polydoc health"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Repository root (defaults to the repository containing polydoc)"
    )]
    pub repo: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Output root, relative to the repository root unless absolute [default: docs/api]"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Run arguments for the sweep, whether given at the top level or after `run`
    pub fn run_args(&self) -> &RunArgs {
        match &self.command {
            Some(Commands::Run(args)) => args,
            _ => &self.run,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the full documentation sweep (default)",
        long_about = "Detects toolchains, probes each generator and runs every one that is \
                      detected and installed.\n\n\
                      Examples:\n  \
                      polydoc run\n  \
                      polydoc run --skip doxygen\n  \
                      polydoc run --no-clean"
    )]
    Run(RunArgs),

    #[command(
        about = "Show which toolchains the repository contains",
        long_about = "Runs only toolchain detection and prints the evidence. Nothing is \
                      probed, run or written.\n\n\
                      Examples:\n  \
                      polydoc detect\n  \
                      polydoc detect --format yaml"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Check which documentation generators are installed",
        long_about = "Probes every generator polydoc knows about and prints install hints \
                      for the missing ones. No generator is run.\n\n\
                      Examples:\n  \
                      polydoc health\n  \
                      polydoc health --format json"
    )]
    Health(HealthArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(
        long,
        value_name = "TOOLCHAIN",
        value_delimiter = ',',
        value_parser = parse_toolchain,
        help = "Only consider these toolchains (comma separated)"
    )]
    pub only: Vec<ToolchainId>,

    #[arg(
        long,
        value_name = "TOOLCHAIN",
        value_delimiter = ',',
        value_parser = parse_toolchain,
        help = "Never run these toolchains (comma separated)"
    )]
    pub skip: Vec<ToolchainId>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Format of the final report"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Keep output of generators that did not run this time")]
    pub no_clean: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    #[default]
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_toolchain(s: &str) -> Result<ToolchainId, String> {
    s.trim().parse::<ToolchainId>()
}
