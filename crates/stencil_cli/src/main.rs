//! stencil CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: File system error

use std::process::ExitCode;

use clap::Parser;
use stencil_templates::{ConfigError, ErrorKind, FsError, PromptError};
use stencil_validate::ValidationError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, CommandError, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const FILE_SYSTEM_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet, cli.log_json);

    let config_path = cli.config.clone();
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, config_path).await,
        Commands::Inspect(args) => commands::inspect::execute(args, config_path).await,
        Commands::Check(args) => commands::check::execute(args, config_path).await,
        Commands::List(args) => commands::list::execute(args, config_path).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Log to stderr so stdout carries only command output.
fn init_logging(verbose: bool, quiet: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));
    let registry = tracing_subscriber::registry().with(filter);

    let log_result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "stencil=debug,warn"
    } else {
        "stencil=info,warn"
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<PromptError>() {
        return match err.kind() {
            ErrorKind::Validation => ExitCodes::VALIDATION_FAILURE,
            ErrorKind::FileSystem => ExitCodes::FILE_SYSTEM_ERROR,
        };
    }
    if e.downcast_ref::<ValidationError>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }
    if e.downcast_ref::<FsError>().is_some() || e.downcast_ref::<ConfigError>().is_some() {
        return ExitCodes::FILE_SYSTEM_ERROR;
    }

    match e.downcast_ref::<CommandError>() {
        Some(CommandError::InvalidArgument(_)) => ExitCodes::INVALID_ARGS,
        Some(CommandError::CheckFailed(_)) => ExitCodes::VALIDATION_FAILURE,
        None => ExitCodes::GENERAL_ERROR,
    }
}
