//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod check_iban;
pub mod check_malo;
pub mod validate;

/// pvtool - plausibility validation of migration data sets
#[derive(Parser)]
#[command(name = "pvtool")]
#[command(version, about = "pvtool - plausibility validation of migration data sets")]
#[command(long_about = r#"
pvtool checks exported migration data sets against the plausibility rules of
the target-system loaders before they are loaded.

COMMANDS:
  validate    → Validate customer or resource data sets from JSON exports
  check-malo  → Check market location ids (MaLo-IDs)
  check-iban  → Check IBANs

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate data sets from JSON or JSON-lines files
    Validate(validate::ValidateArgs),

    /// Check market location ids
    #[command(name = "check-malo")]
    CheckMalo(check_malo::CheckMaloArgs),

    /// Check IBANs
    #[command(name = "check-iban")]
    CheckIban(check_iban::CheckIbanArgs),
}
