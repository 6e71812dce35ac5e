//! Check-malo command - Validate MaLo-IDs.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::error::CliError;
use pv_tool::validate_marktlokations_id;

#[derive(Args)]
pub struct CheckMaloArgs {
    /// MaLo-IDs to check
    #[arg(required = true)]
    ids: Vec<String>,
}

pub fn execute(args: CheckMaloArgs) -> Result<()> {
    debug!("Checking {} MaLo-ID(s)", args.ids.len());

    let mut invalid = 0;
    for id in &args.ids {
        match validate_marktlokations_id(id) {
            Ok(()) => println!("✅ {}", id),
            Err(e) => {
                invalid += 1;
                println!("❌ {}: {}", id, e);
            }
        }
    }

    if invalid > 0 {
        return Err(CliError::ValidationFailed(format!("{} of {} MaLo-IDs invalid", invalid, args.ids.len())).into());
    }
    Ok(())
}
