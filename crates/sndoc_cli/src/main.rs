//! sndoc CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::{validate::GateFailure, Cli, Commands};
use config::ConfigError;
use sndoc_core::CoreError;
use sndoc_validate::ValidateError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "sndoc=debug"
    } else if cli.quiet {
        "sndoc=warn"
    } else {
        "sndoc=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so rendered reports stay clean on stdout.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, cli.config.as_deref()),
        Commands::Types(args) => commands::types::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<GateFailure>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<ValidateError>() {
            return match err {
                ValidateError::Rejected { .. } => ExitCodes::VALIDATION_FAILURE,
                ValidateError::UnsupportedFormat(_) | ValidateError::UnknownMode(_) => {
                    ExitCodes::INVALID_ARGS
                }
                ValidateError::Serialization(_) => ExitCodes::GENERAL_ERROR,
            };
        }
        if let Some(err) = cause.downcast_ref::<CoreError>() {
            return match err {
                CoreError::UnknownDocumentType(_) | CoreError::DataNotFound(_) => {
                    ExitCodes::INVALID_ARGS
                }
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if let Some(ConfigError::NotFound(_)) = cause.downcast_ref::<ConfigError>() {
            return ExitCodes::INVALID_ARGS;
        }
    }

    ExitCodes::GENERAL_ERROR
}
