//! Error types for the pvtool CLI.

use thiserror::Error;

/// Command outcomes that map to a dedicated exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
