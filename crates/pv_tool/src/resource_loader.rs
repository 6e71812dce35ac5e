//! Validation manager for the Tripica resource loader.

use std::sync::LazyLock;

use anyhow::bail;
use pv_framework::{Params, PathMappedValidator, ValidationManager, Validator};
use pv_model::{Sparte, TripicaResourceLoaderDataSet};
use regex::Regex;
use tracing::debug;

use crate::error::ToolResult;

pub type ResourceValidationManager = ValidationManager<TripicaResourceLoaderDataSet, ()>;

static MARKTLOKATIONS_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{11}$").expect("marktlokations_id regex is valid"));
static MESSLOKATIONS_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DE\d{11}[A-Z\d]{20}$").expect("messlokations_id regex is valid"));

const ALLOWED_SPARTEN: [Sparte; 2] = [Sparte::Strom, Sparte::Gas];

fn check_marktlokations_id(p: &Params<()>) -> anyhow::Result<()> {
    let id: String = p.get("marktlokations_id")?;
    if !MARKTLOKATIONS_ID.is_match(&id) {
        bail!("{} has to consist of 11 digits.", p.param_id("marktlokations_id"));
    }
    Ok(())
}

fn check_messlokations_id(p: &Params<()>) -> anyhow::Result<()> {
    let id: String = p.get("messlokations_id")?;
    if !MESSLOKATIONS_ID.is_match(&id) {
        bail!(
            "{} has to start with 'DE' followed by 11 digits and 20 alphanumeric characters.",
            p.param_id("messlokations_id")
        );
    }
    Ok(())
}

fn check_sparte(p: &Params<()>) -> anyhow::Result<()> {
    let sparte: Sparte = p.get("sparte")?;
    if !ALLOWED_SPARTEN.contains(&sparte) {
        let allowed: Vec<String> = ALLOWED_SPARTEN.iter().map(|s| format!("'{}'", s)).collect();
        bail!(
            "{} must be one of the following: {}",
            p.param_id("sparte"),
            allowed.join(", ")
        );
    }
    Ok(())
}

fn check_zaehlernummer(p: &Params<()>) -> anyhow::Result<()> {
    let zaehlernummer: String = p.get("zaehlernummer")?;
    if zaehlernummer.starts_with(char::is_whitespace) {
        bail!("{} must not start with whitespace", p.param_id("zaehlernummer"));
    }
    Ok(())
}

/// Build the validation manager for resource data sets.
pub fn resource_validation_manager() -> ToolResult<ResourceValidationManager> {
    let mut manager = ValidationManager::new(());

    manager
        .register(PathMappedValidator::new(
            Validator::new("check_marktlokations_id", check_marktlokations_id)
                .required::<String>("marktlokations_id"),
            [("marktlokations_id", "marktlokation.marktlokations_id")],
        )?)
        .register(PathMappedValidator::new(
            Validator::new("check_messlokations_id", check_messlokations_id)
                .required::<String>("messlokations_id"),
            [("messlokations_id", "messlokation.messlokations_id")],
        )?)
        .register(PathMappedValidator::new(
            Validator::new("check_sparte", check_sparte).required::<Sparte>("sparte"),
            [("sparte", "vertrag.sparte")],
        )?)
        .register(PathMappedValidator::new(
            Validator::new("check_zaehlernummer", check_zaehlernummer).required::<String>("zaehlernummer"),
            [("zaehlernummer", "zaehler.zaehlernummer")],
        )?);

    debug!("Registered {} resource validators", manager.len());
    Ok(manager)
}
