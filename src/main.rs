use polydoc::cli::commands::{CliArgs, Commands};
use polydoc::cli::handlers::{handle_detect, handle_health, handle_run};
use polydoc::util::logging::{config_from_env, init_logging, parse_level};
use polydoc::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(config_from_env(level_override(&args)));

    debug!("polydoc v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        None | Some(Commands::Run(_)) => handle_run(&args, args.run_args()).await,
        Some(Commands::Detect(detect_args)) => handle_detect(&args, detect_args).await,
        Some(Commands::Health(health_args)) => handle_health(health_args).await,
    };

    std::process::exit(exit_code);
}

/// `--log-level` wins over `--verbose`, which wins over `--quiet`; without any
/// of them the environment decides
fn level_override(args: &CliArgs) -> Option<Level> {
    if let Some(level_str) = &args.log_level {
        Some(parse_level(level_str))
    } else if args.verbose {
        Some(Level::DEBUG)
    } else if args.quiet {
        Some(Level::ERROR)
    } else {
        None
    }
}
