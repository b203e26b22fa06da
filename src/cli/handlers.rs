//! Subcommand handlers
//!
//! Each handler returns the process exit code: 0 when the command completed,
//! 1 on a fatal error. Backend failures are not fatal.

use super::commands::{CliArgs, DetectArgs, HealthArgs, RunArgs};
use super::output::{EvidenceView, OutputFormat, OutputFormatter};
use crate::backends::BackendRegistry;
use crate::config::{ConfigError, PolydocConfig};
use crate::dispatch::{check_health, Selection, SystemProbe};
use crate::orchestrator::Orchestrator;
use crate::progress::{CompositeHandler, LineReporter, LoggingHandler};
use crate::root::RootResolver;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

/// Environment configuration with command-line overrides applied
pub fn load_config(args: &CliArgs) -> Result<PolydocConfig, ConfigError> {
    let mut config = PolydocConfig::default();

    if let Some(repo) = &args.repo {
        config.repo_root = Some(repo.clone());
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    } else if args.verbose {
        config.log_level = "debug".to_string();
    } else if args.quiet {
        config.log_level = "error".to_string();
    }
    if args.run_args().no_clean {
        config.clean_stale = false;
    }

    config.validate()?;
    Ok(config)
}

fn prepare(args: &CliArgs) -> Result<(PolydocConfig, PathBuf), i32> {
    let config = load_config(args).map_err(|e| {
        error!("Invalid configuration: {}", e);
        eprintln!("Error: {}", e);
        1
    })?;
    debug!("Configuration loaded: {:?}", config);

    let root = RootResolver::new()
        .with_explicit(config.repo_root.clone())
        .resolve()
        .map_err(|e| {
            error!("Failed to resolve repository root: {}", e);
            eprintln!("Error: {}", e);
            e.exit_code()
        })?;

    Ok((config, root))
}

pub async fn handle_run(args: &CliArgs, run: &RunArgs) -> i32 {
    let (config, root) = match prepare(args) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let format: OutputFormat = run.format.into();
    let reporter = if format.is_machine_readable() {
        LineReporter::stderr()
    } else {
        LineReporter::stdout()
    };
    let status = CompositeHandler::new()
        .with(Arc::new(reporter))
        .with(Arc::new(LoggingHandler));

    let orchestrator = Orchestrator::new(root, &config).with_status(Arc::new(status));
    let selection = Selection::new(run.only.clone(), run.skip.clone());

    let report = match orchestrator.run(&selection).await {
        Ok(report) => report,
        Err(e) => {
            error!("Documentation run aborted: {}", e);
            eprintln!("Error: {}", e);
            return e.exit_code();
        }
    };

    match OutputFormatter::new(format).format_report(&report) {
        Ok(output) => {
            if !format.is_machine_readable() {
                println!();
            }
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format report: {}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_detect(args: &CliArgs, detect: &DetectArgs) -> i32 {
    let (config, root) = match prepare(args) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let orchestrator = Orchestrator::new(root, &config);
    if let Err(e) = orchestrator.check_output_root() {
        error!("Detection aborted: {}", e);
        eprintln!("Error: {}", e);
        return e.exit_code();
    }
    let evidence = orchestrator.detect();
    let view = EvidenceView::new(orchestrator.repo_root(), evidence);

    match OutputFormatter::new(detect.format.into()).format_evidence(&view) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format evidence: {}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_health(health: &HealthArgs) -> i32 {
    let registry = BackendRegistry::with_defaults();
    let entries = check_health(&registry, &SystemProbe).await;

    match OutputFormatter::new(health.format.into()).format_health(&entries) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("Failed to format health status: {}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_overrides_environment() {
        std::env::set_var("POLYDOC_OUTPUT_DIR", "from-env");
        let args = CliArgs::parse_from([
            "polydoc",
            "--output",
            "from-cli",
            "--no-clean",
            "--log-level",
            "WARN",
        ]);
        let config = load_config(&args).unwrap();
        std::env::remove_var("POLYDOC_OUTPUT_DIR");

        assert_eq!(config.output_dir, PathBuf::from("from-cli"));
        assert!(!config.clean_stale);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    #[serial]
    fn test_invalid_max_depth_is_rejected() {
        std::env::set_var("POLYDOC_MAX_DEPTH", "0");
        let args = CliArgs::parse_from(["polydoc", "detect"]);
        let result = load_config(&args);
        std::env::remove_var("POLYDOC_MAX_DEPTH");

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_verbose_sets_debug_level() {
        std::env::remove_var("POLYDOC_LOG_LEVEL");
        let args = CliArgs::parse_from(["polydoc", "-v"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}
