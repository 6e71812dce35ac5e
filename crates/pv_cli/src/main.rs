//! pvtool CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod error;

use commands::{Cli, Commands};
use error::CliError;
use pv_tool::ToolError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const CONFIG_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let mut filter = EnvFilter::from_default_env();
    for target in ["pvtool", "pv_framework", "pv_model", "pv_tool"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    if let Ok(directive) = "warn".parse() {
        filter = filter.add_directive(directive);
    }

    // Logs go to stderr so that JSON reports on stdout stay parseable
    let registry = tracing_subscriber::registry().with(filter);
    let _ = if cli.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args).await,
        Commands::CheckMalo(args) => commands::check_malo::execute(args),
        Commands::CheckIban(args) => commands::check_iban::execute(args),
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
    for cause in e.chain() {
        if let Some(cli_error) = cause.downcast_ref::<CliError>() {
            return match cli_error {
                CliError::InvalidArgs(_) => ExitCodes::INVALID_ARGS,
                CliError::ValidationFailed(_) => ExitCodes::VALIDATION_FAILURE,
            };
        }
        if let Some(tool_error) = cause.downcast_ref::<ToolError>() {
            return match tool_error {
                ToolError::Framework(_) => ExitCodes::GENERAL_ERROR,
                ToolError::ConfigNotFound(_)
                | ToolError::UnsupportedFormat(_)
                | ToolError::InvalidKeyDate { .. }
                | ToolError::MissingConfig(_)
                | ToolError::Io(_)
                | ToolError::Yaml(_)
                | ToolError::Toml(_)
                | ToolError::Json(_) => ExitCodes::CONFIG_ERROR,
            };
        }
    }
    ExitCodes::GENERAL_ERROR
}
