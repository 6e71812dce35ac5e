//! Validation manager for the Tripica customer loader.

use pv_framework::{
    FrameworkResult, IterStrategy, ParallelQueryMappedValidator, PathMappedValidator, Query,
    QueryMappedValidator, ValidationManager, Validator,
};
use pv_model::TripicaCustomerLoaderDataSet;
use tracing::debug;

use crate::checks;
use crate::config::MigrationConfig;
use crate::error::ToolResult;

pub type CustomerValidationManager = ValidationManager<TripicaCustomerLoaderDataSet, MigrationConfig>;

/// Entries of a collection keyed by contract id, e.g. `banks[contract_id=c1]`.
fn by_contract_id(collection: &str) -> Query {
    Query::new()
        .path(collection)
        .iter(IterStrategy::keyed("contract_id"))
}

/// All contract accounts of all master accounts, tracked by their ouid.
fn cbas() -> Query {
    Query::new()
        .path("vertragskonten_mbas")
        .iter(IterStrategy::by_field("ouid"))
        .path("cbas")
        .iter(IterStrategy::by_field("ouid"))
}

fn geschaeftspartner(
    validator: Validator<MigrationConfig>,
    param: &str,
    field: &str,
) -> FrameworkResult<PathMappedValidator<MigrationConfig>> {
    PathMappedValidator::new(validator, [(param, format!("geschaeftspartner_erw.{}", field))])
}

/// Pair a bank account field with the SEPA payer flag of the same account.
fn bank_field(
    validator: Validator<MigrationConfig>,
    param: &str,
    field: &str,
) -> FrameworkResult<ParallelQueryMappedValidator<MigrationConfig>> {
    ParallelQueryMappedValidator::new(
        validator,
        [
            (param, by_contract_id("banks").path(field)),
            ("sepa_zahler", by_contract_id("banks").path("sepa_info.sepa_zahler")),
        ],
    )
}

/// Build the validation manager for customer data sets.
pub fn customer_validation_manager(config: MigrationConfig) -> ToolResult<CustomerValidationManager> {
    let mut manager = ValidationManager::new(config);

    manager
        .register(geschaeftspartner(checks::anrede(), "anrede", "anrede")?)
        .register(geschaeftspartner(checks::str_is_stripped(), "string", "name1")?)
        .register(geschaeftspartner(checks::str_is_stripped(), "string", "name2")?)
        .register(geschaeftspartner(checks::name3(), "name3", "name3")?)
        .register(geschaeftspartner(checks::e_mail(), "e_mail", "e_mail_adresse")?)
        .register(geschaeftspartner(
            checks::extern_customer_id(),
            "externe_referenzen",
            "externe_referenzen",
        )?)
        .register(geschaeftspartner(
            checks::date_in_past_required(),
            "past_date",
            "erstellungsdatum",
        )?)
        .register(geschaeftspartner(checks::geburtsdatum(), "geburtsdatum", "geburtstag")?);

    for field in ["telefonnummer_privat", "telefonnummer_geschaeft", "telefonnummer_mobil"] {
        manager.register(geschaeftspartner(checks::telefonnummer(), "telefonnummer", field)?);
    }

    manager
        .register(QueryMappedValidator::new(
            checks::address_deutsch(),
            [("address", by_contract_id("liefer_adressen"))],
        )?)
        .register(QueryMappedValidator::new(
            checks::address_fields(),
            [("address", by_contract_id("liefer_adressen"))],
        )?)
        .register(QueryMappedValidator::new(
            checks::address_fields(),
            [("address", by_contract_id("rechnungs_adressen"))],
        )?)
        .register(QueryMappedValidator::new(
            checks::postleitzahl(),
            [("postleitzahl", by_contract_id("rechnungs_adressen").path("postleitzahl"))],
        )?);

    manager
        .register(bank_field(checks::iban(), "iban", "iban")?)
        .register(bank_field(checks::bic(), "bic", "bic")?)
        .register(bank_field(checks::kontoinhaber(), "kontoinhaber", "kontoinhaber")?)
        .register(bank_field(
            checks::date_in_past_bankverbindung(),
            "past_date",
            "gueltig_seit",
        )?)
        .register(QueryMappedValidator::new(
            checks::date_in_future_optional(),
            [("future_date", by_contract_id("banks").path("gueltig_bis"))],
        )?)
        .register(QueryMappedValidator::new(
            checks::date_in_past_optional(),
            [("past_date", by_contract_id("banks").path("sepa_info.gueltig_seit"))],
        )?)
        .register(bank_field(checks::bankname(), "bankname", "bankname")?);

    manager
        .register(QueryMappedValidator::new(
            checks::vertragskontonummer(),
            [("vertragskontonummer", cbas().path("vertrag.vertragsnummer"))],
        )?)
        .register(QueryMappedValidator::new(
            checks::is_datetime(),
            [("date_to_check", cbas().path("erstellungsdatum"))],
        )?);

    debug!("Registered {} customer validators", manager.len());
    Ok(manager)
}
