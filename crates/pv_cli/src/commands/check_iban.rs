//! Check-iban command - Validate IBANs and BICs.

use anyhow::Result;
use clap::Args;

use crate::error::CliError;
use pv_tool::{validate_bic, validate_iban};

#[derive(Args)]
pub struct CheckIbanArgs {
    /// IBANs to check (spaces are ignored, quote grouped IBANs)
    #[arg(required = true)]
    ibans: Vec<String>,

    /// Also check a BIC
    #[arg(long)]
    bic: Option<String>,
}

pub fn execute(args: CheckIbanArgs) -> Result<()> {
    let mut invalid = 0;

    for iban in &args.ibans {
        match validate_iban(iban) {
            Ok(()) => println!("✅ {}", iban),
            Err(e) => {
                invalid += 1;
                println!("❌ {}: {}", iban, e);
            }
        }
    }

    if let Some(bic) = &args.bic {
        match validate_bic(bic) {
            Ok(()) => println!("✅ {}", bic),
            Err(e) => {
                invalid += 1;
                println!("❌ {}: {}", bic, e);
            }
        }
    }

    if invalid > 0 {
        return Err(CliError::ValidationFailed(format!("{} invalid IBAN/BIC value(s)", invalid)).into());
    }
    Ok(())
}
