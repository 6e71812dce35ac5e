//! Validation rules shared by the loader managers.
//!
//! Every `check_*` function validates the extracted parameters of one call;
//! the matching constructor (same name without the prefix) declares the
//! parameters and wraps the function into a [`Validator`].

use std::sync::LazyLock;

use anyhow::{bail, Context};
use chrono::{DateTime, Months, NaiveDate, Utc};
use pv_framework::{required_field, Params, Validator};
use pv_model::{Adresse, Anrede, ExterneReferenz, Landescode};
use regex::Regex;

use crate::banking;
use crate::config::{berlin_date, MigrationConfig};
use crate::email::validate_email;

static CUSTOMER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^2\d{8}$").expect("customer id regex is valid"));
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+?[1-9]|0)[0-9]{7,14}$").expect("phone number regex is valid"));
static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-.\s()]").expect("phone separator regex is valid"));
static GERMAN_POSTLEITZAHL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("postleitzahl regex is valid"));
static POSTLEITZAHL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\dA-Za-z]+$").expect("postleitzahl regex is valid"));
static VERTRAGSKONTONUMMER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{9}$").expect("vertragskontonummer regex is valid"));

const ALLOWED_ANREDEN: [Anrede; 4] = [Anrede::Herr, Anrede::Frau, Anrede::Firma, Anrede::Eheleute];
const ALLOWED_TITLES: [&str; 3] = ["Dr.", "Prof.", "Prof. Dr."];
const EARLIEST_BIRTHDAY: (i32, u32, u32) = (1900, 1, 1);
const MIN_AGE_MONTHS: u32 = 18 * 12;

/// Name of the external reference holding the target-system customer id.
pub const CUSTOMER_ID_REFERENCE: &str = "customerID";

// Geschaeftspartner

pub fn check_anrede<C>(p: &Params<C>) -> anyhow::Result<()> {
    let anrede: Anrede = p.get("anrede")?;
    if !ALLOWED_ANREDEN.contains(&anrede) {
        let allowed: Vec<&str> = ALLOWED_ANREDEN.iter().map(Anrede::as_str).collect();
        bail!(
            "{} must be one of the following: {}",
            p.param_id("anrede"),
            allowed.join(", ")
        );
    }
    Ok(())
}

pub fn anrede<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_anrede", check_anrede::<C>).required::<Anrede>("anrede")
}

pub fn check_str_is_stripped<C>(p: &Params<C>) -> anyhow::Result<()> {
    let string: String = p.get("string")?;
    if string.trim() != string {
        bail!("{} must not start or end with whitespace.", p.param_id("string"));
    }
    Ok(())
}

pub fn str_is_stripped<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_str_is_stripped", check_str_is_stripped::<C>).required::<String>("string")
}

pub fn check_name3<C>(p: &Params<C>) -> anyhow::Result<()> {
    match p.get_opt::<String>("name3")? {
        Some(name3) if !name3.is_empty() && !ALLOWED_TITLES.contains(&name3.as_str()) => bail!(
            "{} must be one of the following: {}",
            p.param_id("name3"),
            ALLOWED_TITLES.join(", ")
        ),
        _ => Ok(()),
    }
}

pub fn name3<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_name3", check_name3::<C>).optional::<String>("name3")
}

pub fn check_e_mail<C>(p: &Params<C>) -> anyhow::Result<()> {
    match p.get_opt::<String>("e_mail")? {
        Some(e_mail) if !e_mail.is_empty() => validate_email(&e_mail)
            .with_context(|| format!("{} is not a valid e-mail address", p.param_id("e_mail"))),
        _ => Ok(()),
    }
}

pub fn e_mail<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_e_mail", check_e_mail::<C>).optional::<String>("e_mail")
}

/// A missing list counts as a list without the customer id reference.
pub fn check_extern_customer_id<C>(p: &Params<C>) -> anyhow::Result<()> {
    let referenzen = p
        .get_opt::<Vec<ExterneReferenz>>("externe_referenzen")?
        .unwrap_or_default();

    let customer_id = referenzen
        .iter()
        .find(|r| r.ex_ref_name.as_deref() == Some(CUSTOMER_ID_REFERENCE))
        .and_then(|r| r.ex_ref_wert.as_deref());
    let Some(customer_id) = customer_id else {
        bail!("No ExterneReferenz with name {}", CUSTOMER_ID_REFERENCE);
    };

    if !CUSTOMER_ID.is_match(customer_id) {
        bail!(
            "{} -> {} has to start with 2 followed by 8 digits.",
            p.param_id("externe_referenzen"),
            CUSTOMER_ID_REFERENCE
        );
    }
    Ok(())
}

pub fn extern_customer_id<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_extern_customer_id", check_extern_customer_id::<C>)
        .optional::<Vec<ExterneReferenz>>("externe_referenzen")
}

pub fn check_geburtsdatum(p: &Params<MigrationConfig>) -> anyhow::Result<()> {
    let geburtsdatum: DateTime<Utc> = p.get("geburtsdatum")?;
    let key_date = p.context().key_date_berlin();

    // 29 February clamps to 28 February
    let latest = key_date
        .checked_sub_months(Months::new(MIN_AGE_MONTHS))
        .context("migration key date is out of range")?;
    let (year, month, day) = EARLIEST_BIRTHDAY;
    let earliest = NaiveDate::from_ymd_opt(year, month, day).context("invalid earliest birthday")?;

    let birthday = berlin_date(&geburtsdatum);
    if birthday > latest || birthday < earliest {
        bail!(
            "{} must be in the range of {} to {}.",
            p.param_id("geburtsdatum"),
            earliest,
            latest
        );
    }
    Ok(())
}

pub fn geburtsdatum() -> Validator<MigrationConfig> {
    Validator::new("check_geburtsdatum", check_geburtsdatum).required::<DateTime<Utc>>("geburtsdatum")
}

pub fn check_telefonnummer<C>(p: &Params<C>) -> anyhow::Result<()> {
    let Some(telefonnummer) = p.get_opt::<String>("telefonnummer")? else {
        return Ok(());
    };
    if telefonnummer.is_empty() {
        return Ok(());
    }

    let compact = PHONE_SEPARATORS.replace_all(&telefonnummer, "");
    if !PHONE_NUMBER.is_match(&compact) {
        bail!(
            "{} does not match the regex pattern for phone numbers.",
            p.param_id("telefonnummer")
        );
    }
    Ok(())
}

pub fn telefonnummer<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_telefonnummer", check_telefonnummer::<C>).optional::<String>("telefonnummer")
}

// Dates relative to the migration key date

fn is_after_key_date(date: &DateTime<Utc>, config: &MigrationConfig) -> bool {
    berlin_date(date) > config.key_date_berlin()
}

fn not_in_past(id: &str, config: &MigrationConfig) -> anyhow::Error {
    anyhow::anyhow!(
        "{} must be in the past as of {}",
        id,
        config.migration_key_date.to_rfc3339()
    )
}

fn not_in_future(id: &str, config: &MigrationConfig) -> anyhow::Error {
    anyhow::anyhow!(
        "{} must be in the future as of {}",
        id,
        config.migration_key_date.to_rfc3339()
    )
}

pub fn check_date_in_past_required(p: &Params<MigrationConfig>) -> anyhow::Result<()> {
    let past_date: DateTime<Utc> = p.get("past_date")?;
    if is_after_key_date(&past_date, p.context()) {
        return Err(not_in_past(p.param_id("past_date"), p.context()));
    }
    Ok(())
}

pub fn date_in_past_required() -> Validator<MigrationConfig> {
    Validator::new("check_date_in_past_required", check_date_in_past_required)
        .required::<DateTime<Utc>>("past_date")
}

pub fn check_date_in_past_optional(p: &Params<MigrationConfig>) -> anyhow::Result<()> {
    match p.get_opt::<DateTime<Utc>>("past_date")? {
        Some(past_date) if is_after_key_date(&past_date, p.context()) => {
            Err(not_in_past(p.param_id("past_date"), p.context()))
        }
        _ => Ok(()),
    }
}

pub fn date_in_past_optional() -> Validator<MigrationConfig> {
    Validator::new("check_date_in_past_optional", check_date_in_past_optional)
        .optional::<DateTime<Utc>>("past_date")
}

pub fn check_date_in_future_required(p: &Params<MigrationConfig>) -> anyhow::Result<()> {
    let future_date: DateTime<Utc> = p.get("future_date")?;
    if future_date < p.context().migration_key_date {
        return Err(not_in_future(p.param_id("future_date"), p.context()));
    }
    Ok(())
}

pub fn date_in_future_required() -> Validator<MigrationConfig> {
    Validator::new("check_date_in_future_required", check_date_in_future_required)
        .required::<DateTime<Utc>>("future_date")
}

pub fn check_date_in_future_optional(p: &Params<MigrationConfig>) -> anyhow::Result<()> {
    match p.get_opt::<DateTime<Utc>>("future_date")? {
        Some(future_date) if future_date < p.context().migration_key_date => {
            Err(not_in_future(p.param_id("future_date"), p.context()))
        }
        _ => Ok(()),
    }
}

pub fn date_in_future_optional() -> Validator<MigrationConfig> {
    Validator::new("check_date_in_future_optional", check_date_in_future_optional)
        .optional::<DateTime<Utc>>("future_date")
}

// Addresses

pub fn check_address_deutsch<C>(p: &Params<C>) -> anyhow::Result<()> {
    let address: Adresse = p.get("address")?;
    let id = p.param_id("address");

    if *required_field(&address.landescode, "landescode")? != Landescode::DE {
        bail!("{}.landescode must be 'DE'", id);
    }
    if !GERMAN_POSTLEITZAHL.is_match(required_field(&address.postleitzahl, "postleitzahl")?) {
        bail!("{}.postleitzahl must consist of 5 digits", id);
    }
    Ok(())
}

pub fn address_deutsch<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_address_deutsch", check_address_deutsch::<C>).required::<Adresse>("address")
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// Allowed combinations: strasse and hausnummer without postfach, postfach
/// without strasse and hausnummer, or none of them. Empty strings count as
/// missing.
pub fn check_address_fields<C>(p: &Params<C>) -> anyhow::Result<()> {
    let address: Adresse = p.get("address")?;
    required_field(&address.ort, "ort")?;
    required_field(&address.postleitzahl, "postleitzahl")?;

    let street = (is_filled(&address.strasse), is_filled(&address.hausnummer));
    let valid = match (street, is_filled(&address.postfach)) {
        ((true, true), false) => true,
        ((false, false), _) => true,
        _ => false,
    };
    if !valid {
        bail!(
            "{} must contain either strasse and hausnummer or postfach",
            p.param_id("address")
        );
    }
    Ok(())
}

pub fn address_fields<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_address_fields", check_address_fields::<C>).required::<Adresse>("address")
}

pub fn check_postleitzahl<C>(p: &Params<C>) -> anyhow::Result<()> {
    let postleitzahl: String = p.get("postleitzahl")?;
    if !POSTLEITZAHL.is_match(&postleitzahl) {
        bail!("{} is invalid", p.param_id("postleitzahl"));
    }
    Ok(())
}

pub fn postleitzahl<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_postleitzahl", check_postleitzahl::<C>).required::<String>("postleitzahl")
}

// Bank accounts. Every field is only required for SEPA payers.

fn required_for_sepa_zahler<C>(p: &Params<C>, name: &str) -> anyhow::Result<Option<String>> {
    let sepa_zahler: bool = p.get("sepa_zahler")?;
    if !sepa_zahler {
        return Ok(None);
    }
    match p.get_opt::<String>(name)? {
        Some(value) => Ok(Some(value)),
        None => bail!("{} is required for sepa_zahler", p.param_id(name)),
    }
}

pub fn check_iban<C>(p: &Params<C>) -> anyhow::Result<()> {
    if let Some(iban) = required_for_sepa_zahler(p, "iban")? {
        banking::validate_iban(&iban)
            .with_context(|| format!("{} is not a valid IBAN", p.param_id("iban")))?;
    }
    Ok(())
}

pub fn iban<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_iban", check_iban::<C>)
        .required::<bool>("sepa_zahler")
        .optional::<String>("iban")
}

pub fn check_bic<C>(p: &Params<C>) -> anyhow::Result<()> {
    if let Some(bic) = required_for_sepa_zahler(p, "bic")? {
        banking::validate_bic(&bic)
            .with_context(|| format!("{} is not a valid BIC", p.param_id("bic")))?;
    }
    Ok(())
}

pub fn bic<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_bic", check_bic::<C>)
        .required::<bool>("sepa_zahler")
        .optional::<String>("bic")
}

pub fn check_kontoinhaber<C>(p: &Params<C>) -> anyhow::Result<()> {
    if let Some(kontoinhaber) = required_for_sepa_zahler(p, "kontoinhaber")? {
        if kontoinhaber.trim().is_empty() {
            bail!("{} must be non-empty", p.param_id("kontoinhaber"));
        }
    }
    Ok(())
}

pub fn kontoinhaber<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_kontoinhaber", check_kontoinhaber::<C>)
        .required::<bool>("sepa_zahler")
        .optional::<String>("kontoinhaber")
}

pub fn check_bankname<C>(p: &Params<C>) -> anyhow::Result<()> {
    if let Some(bankname) = required_for_sepa_zahler(p, "bankname")? {
        if bankname.trim().is_empty() {
            bail!("{} must not be empty", p.param_id("bankname"));
        }
    }
    Ok(())
}

pub fn bankname<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_bankname", check_bankname::<C>)
        .required::<bool>("sepa_zahler")
        .optional::<String>("bankname")
}

pub fn check_date_in_past_bankverbindung(p: &Params<MigrationConfig>) -> anyhow::Result<()> {
    let sepa_zahler: bool = p.get("sepa_zahler")?;
    if !sepa_zahler {
        return Ok(());
    }
    let Some(past_date) = p.get_opt::<DateTime<Utc>>("past_date")? else {
        bail!("{} is required for sepa_zahler", p.param_id("past_date"));
    };
    if is_after_key_date(&past_date, p.context()) {
        return Err(not_in_past(p.param_id("past_date"), p.context()));
    }
    Ok(())
}

pub fn date_in_past_bankverbindung() -> Validator<MigrationConfig> {
    Validator::new("check_date_in_past_bankverbindung", check_date_in_past_bankverbindung)
        .required::<bool>("sepa_zahler")
        .optional::<DateTime<Utc>>("past_date")
}

// Contract accounts

pub fn check_vertragskontonummer<C>(p: &Params<C>) -> anyhow::Result<()> {
    let nummer: String = p.get("vertragskontonummer")?;
    if !VERTRAGSKONTONUMMER.is_match(&nummer) {
        bail!("{} must consist of 9 digits", p.param_id("vertragskontonummer"));
    }
    Ok(())
}

pub fn vertragskontonummer<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_vertragskontonummer", check_vertragskontonummer::<C>)
        .required::<String>("vertragskontonummer")
}

/// The type check happens while binding; a bound value is a valid timestamp.
pub fn check_is_datetime<C>(p: &Params<C>) -> anyhow::Result<()> {
    p.get::<DateTime<Utc>>("date_to_check")?;
    Ok(())
}

pub fn is_datetime<C: Send + Sync + 'static>() -> Validator<C> {
    Validator::new("check_is_datetime", check_is_datetime::<C>).required::<DateTime<Utc>>("date_to_check")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pv_framework::ParamValue;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn config() -> MigrationConfig {
        MigrationConfig::new(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap())
    }

    fn params(entries: &[(&str, Option<Value>)]) -> Params<MigrationConfig> {
        let values: HashMap<String, ParamValue> = entries
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    ParamValue {
                        id: format!("x.{}", name),
                        value: value.clone(),
                    },
                )
            })
            .collect();
        Params::new(values, Arc::new(config()))
    }

    fn message(result: anyhow::Result<()>) -> String {
        format!("{:#}", result.unwrap_err())
    }

    #[test]
    fn test_anrede() {
        assert!(check_anrede(&params(&[("anrede", Some(json!("FIRMA")))])).is_ok());
        assert_eq!(
            message(check_anrede(&params(&[("anrede", Some(json!("INDIVIDUELL")))]))),
            "x.anrede must be one of the following: HERR, FRAU, FIRMA, EHELEUTE"
        );
    }

    #[test]
    fn test_names() {
        assert!(check_str_is_stripped(&params(&[("string", Some(json!("Max")))])).is_ok());
        assert_eq!(
            message(check_str_is_stripped(&params(&[("string", Some(json!("Max ")))]))),
            "x.string must not start or end with whitespace."
        );

        assert!(check_name3(&params(&[("name3", None)])).is_ok());
        assert!(check_name3(&params(&[("name3", Some(json!("Prof. Dr.")))])).is_ok());
        assert!(check_name3(&params(&[("name3", Some(json!("No Prof.")))])).is_err());
    }

    #[test]
    fn test_e_mail() {
        assert!(check_e_mail(&params(&[("e_mail", None)])).is_ok());
        assert!(check_e_mail(&params(&[("e_mail", Some(json!("")))])).is_ok());
        let msg = message(check_e_mail(&params(&[("e_mail", Some(json!("test@test")))])));
        assert!(msg.starts_with("x.e_mail is not a valid e-mail address: "));
        assert!(msg.contains("It should have a period"));
    }

    #[test]
    fn test_extern_customer_id() {
        let refs = |wert: &str| Some(json!([{"ex_ref_name": "customerID", "ex_ref_wert": wert}]));

        assert!(check_extern_customer_id(&params(&[("externe_referenzen", refs("209876543"))])).is_ok());
        assert_eq!(
            message(check_extern_customer_id(&params(&[("externe_referenzen", refs("109876543"))]))),
            "x.externe_referenzen -> customerID has to start with 2 followed by 8 digits."
        );
        assert_eq!(
            message(check_extern_customer_id(&params(&[("externe_referenzen", None)]))),
            "No ExterneReferenz with name customerID"
        );
    }

    #[test]
    fn test_dates_relative_to_key_date() {
        // Same Berlin calendar day as the key date counts as past
        let same_day = json!("2023-06-01T20:00:00Z");
        assert!(check_date_in_past_required(&params(&[("past_date", Some(same_day))])).is_ok());
        assert_eq!(
            message(check_date_in_past_required(&params(&[(
                "past_date",
                Some(json!("2023-06-02T00:00:00Z"))
            )]))),
            "x.past_date must be in the past as of 2023-06-01T00:00:00+00:00"
        );
        assert!(check_date_in_past_optional(&params(&[("past_date", None)])).is_ok());

        assert!(check_date_in_future_required(&params(&[(
            "future_date",
            Some(json!("2023-06-01T00:00:00Z"))
        )]))
        .is_ok());
        assert!(check_date_in_future_optional(&params(&[(
            "future_date",
            Some(json!("2023-05-31T23:59:59Z"))
        )]))
        .is_err());
        assert!(check_date_in_future_optional(&params(&[("future_date", None)])).is_ok());
    }

    #[test]
    fn test_geburtsdatum() {
        let check = |date: &str| check_geburtsdatum(&params(&[("geburtsdatum", Some(json!(date)))]));

        assert!(check("2004-02-29T00:00:00Z").is_ok());
        assert!(check("2005-05-31T12:00:00Z").is_ok());
        assert!(check("1899-12-31T12:00:00Z").is_err());
        assert_eq!(
            message(check("2012-02-29T00:00:00Z")),
            "x.geburtsdatum must be in the range of 1900-01-01 to 2005-06-01."
        );
    }

    #[test]
    fn test_telefonnummer() {
        for number in ["+49 (0) 1324832749", "(01575) 01294673", "0221 937436", "0221-937.436"] {
            assert!(
                check_telefonnummer(&params(&[("telefonnummer", Some(json!(number)))])).is_ok(),
                "{}",
                number
            );
        }
        assert_eq!(
            message(check_telefonnummer(&params(&[("telefonnummer", Some(json!("0392ujdi")))]))),
            "x.telefonnummer does not match the regex pattern for phone numbers."
        );
        assert!(check_telefonnummer(&params(&[("telefonnummer", None)])).is_ok());
    }

    #[test]
    fn test_address_deutsch() {
        let address = |value: Value| params(&[("address", Some(value))]);

        assert!(check_address_deutsch(&address(json!({"postleitzahl": "50667", "ort": "Köln"}))).is_ok());
        assert_eq!(
            message(check_address_deutsch(&address(
                json!({"postleitzahl": "50667", "ort": "Köln", "landescode": "GB"})
            ))),
            "x.address.landescode must be 'DE'"
        );
        assert_eq!(
            message(check_address_deutsch(&address(json!({"postleitzahl": "506678", "ort": "Köln"})))),
            "x.address.postleitzahl must consist of 5 digits"
        );
        assert_eq!(
            message(check_address_deutsch(&address(
                json!({"postleitzahl": "50667", "ort": "Köln", "landescode": null})
            ))),
            "'landescode' does not exist"
        );
    }

    #[test]
    fn test_address_fields() {
        let check = |value: Value| check_address_fields(&params(&[("address", Some(value))]));

        assert!(check(json!({"postleitzahl": "50667", "ort": "Köln", "strasse": "Domkloster", "hausnummer": "4"})).is_ok());
        assert!(check(json!({"postleitzahl": "50667", "ort": "Köln", "postfach": "10 20 30"})).is_ok());
        assert!(check(json!({"postleitzahl": "50667", "ort": "Köln"})).is_ok());
        assert!(check(json!({
            "postleitzahl": "50667", "ort": "Köln",
            "strasse": "", "hausnummer": "", "postfach": "10 20 30"
        }))
        .is_ok());
        assert!(check(json!({
            "postleitzahl": "50667", "ort": "Köln",
            "strasse": "Domkloster", "hausnummer": "4", "postfach": ""
        }))
        .is_ok());
        assert!(check(json!({"postleitzahl": "50667", "ort": "Köln", "strasse": "Domkloster", "hausnummer": ""})).is_err());

        assert!(check(json!({"postleitzahl": "50667", "ort": "Köln", "strasse": "Domkloster"})).is_err());
        assert!(check(json!({
            "postleitzahl": "50667", "ort": "Köln",
            "strasse": "Domkloster", "hausnummer": "4", "postfach": "10 20 30"
        }))
        .is_err());
        assert_eq!(
            message(check(json!({"postleitzahl": "50667"}))),
            "'ort' does not exist"
        );
    }

    #[test]
    fn test_bank_fields_for_sepa_zahler() {
        let sepa = |name: &str, value: Option<Value>| params(&[("sepa_zahler", Some(json!(true))), (name, value)]);
        let no_sepa = |name: &str| params(&[("sepa_zahler", Some(json!(false))), (name, None)]);

        assert!(check_iban(&sepa("iban", Some(json!("DE52940594210000082271")))).is_ok());
        assert_eq!(
            message(check_iban(&sepa("iban", Some(json!("DE42940594210000082271"))))),
            "x.iban is not a valid IBAN: Invalid checksum digits"
        );
        assert_eq!(message(check_iban(&sepa("iban", None))), "x.iban is required for sepa_zahler");
        assert!(check_iban(&no_sepa("iban")).is_ok());

        assert_eq!(
            message(check_bic(&sepa("bic", Some(json!("TESTDETT4321"))))),
            "x.bic is not a valid BIC: Invalid length '12'"
        );
        assert_eq!(
            message(check_kontoinhaber(&sepa("kontoinhaber", Some(json!(" "))))),
            "x.kontoinhaber must be non-empty"
        );
        assert_eq!(
            message(check_bankname(&sepa("bankname", Some(json!(""))))),
            "x.bankname must not be empty"
        );
        assert!(check_bankname(&no_sepa("bankname")).is_ok());

        assert_eq!(
            message(check_date_in_past_bankverbindung(&sepa("past_date", None))),
            "x.past_date is required for sepa_zahler"
        );
        assert!(check_date_in_past_bankverbindung(&sepa("past_date", Some(json!("2200-01-01T00:00:00Z")))).is_err());
    }

    #[test]
    fn test_postleitzahl_and_vertragskontonummer() {
        assert!(check_postleitzahl(&params(&[("postleitzahl", Some(json!("1234AB")))])).is_ok());
        assert_eq!(
            message(check_postleitzahl(&params(&[("postleitzahl", Some(json!("34-65c")))]))),
            "x.postleitzahl is invalid"
        );

        assert!(check_vertragskontonummer(&params(&[("vertragskontonummer", Some(json!("300010002")))])).is_ok());
        assert_eq!(
            message(check_vertragskontonummer(&params(&[("vertragskontonummer", Some(json!("2000100")))]))),
            "x.vertragskontonummer must consist of 9 digits"
        );
    }

    #[test]
    fn test_validators_declare_params() {
        let validator = iban::<MigrationConfig>();
        assert_eq!(validator.name(), "check_iban");
        assert!(validator.param("sepa_zahler").unwrap().required);
        assert!(!validator.param("iban").unwrap().required);
        assert!(is_datetime::<()>().param("date_to_check").unwrap().required);
    }
}
