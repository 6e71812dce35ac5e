//! BO4E components.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bo::Vertrag;
use crate::enums::{Kontaktart, Landescode};

fn default_landescode() -> Option<Landescode> {
    Some(Landescode::DE)
}

/// A postal address.
///
/// Valid addresses carry either `strasse` and `hausnummer` or a `postfach`,
/// never both. This is not enforced on construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adresse {
    pub postleitzahl: Option<String>,
    pub ort: Option<String>,
    #[serde(default)]
    pub ortsteil: Option<String>,
    #[serde(default)]
    pub strasse: Option<String>,
    #[serde(default)]
    pub hausnummer: Option<String>,
    #[serde(default)]
    pub postfach: Option<String>,
    #[serde(default)]
    pub adresszusatz: Option<String>,
    #[serde(default)]
    pub co_ergaenzung: Option<String>,
    #[serde(default = "default_landescode")]
    pub landescode: Option<Landescode>,
}

impl Default for Adresse {
    fn default() -> Self {
        Self {
            postleitzahl: None,
            ort: None,
            ortsteil: None,
            strasse: None,
            hausnummer: None,
            postfach: None,
            adresszusatz: None,
            co_ergaenzung: None,
            landescode: default_landescode(),
        }
    }
}

impl Adresse {
    /// Street address in Germany.
    pub fn street(
        postleitzahl: impl Into<String>,
        ort: impl Into<String>,
        strasse: impl Into<String>,
        hausnummer: impl Into<String>,
    ) -> Self {
        Self {
            postleitzahl: Some(postleitzahl.into()),
            ort: Some(ort.into()),
            strasse: Some(strasse.into()),
            hausnummer: Some(hausnummer.into()),
            ..Default::default()
        }
    }

    /// PO box address in Germany.
    pub fn po_box(postleitzahl: impl Into<String>, ort: impl Into<String>, postfach: impl Into<String>) -> Self {
        Self {
            postleitzahl: Some(postleitzahl.into()),
            ort: Some(ort.into()),
            postfach: Some(postfach.into()),
            ..Default::default()
        }
    }

    pub fn with_landescode(mut self, landescode: Landescode) -> Self {
        self.landescode = Some(landescode);
        self
    }
}

/// A reference into an external system, e.g. the customer id of the source system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExterneReferenz {
    pub ex_ref_name: Option<String>,
    pub ex_ref_wert: Option<String>,
}

impl ExterneReferenz {
    pub fn new(name: impl Into<String>, wert: impl Into<String>) -> Self {
        Self {
            ex_ref_name: Some(name.into()),
            ex_ref_wert: Some(wert.into()),
        }
    }
}

/// SEPA direct debit information of a bank account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SepaInfo {
    #[serde(default)]
    pub sepa_id: Option<String>,
    #[serde(default)]
    pub sepa_zahler: Option<bool>,
    #[serde(default)]
    pub creditor_identifier: Option<String>,
    #[serde(default)]
    pub gueltig_seit: Option<DateTime<Utc>>,
}

/// A bank account of a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Bankverbindung {
    #[serde(default)]
    pub ouid: Option<i64>,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub bic: Option<String>,
    #[serde(default)]
    pub bankname: Option<String>,
    #[serde(default)]
    pub kontoinhaber: Option<String>,
    #[serde(default)]
    pub gueltig_seit: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gueltig_bis: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sepa_info: Option<SepaInfo>,
}

/// Assignment of a metering location to a market location over time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Messlokationszuordnung {
    #[serde(default)]
    pub messlokations_id: Option<String>,
    #[serde(default)]
    pub gueltig_seit: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gueltig_bis: Option<DateTime<Utc>>,
}

/// Contract account of a single contract ("contract billing account").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VertragskontoCba {
    #[serde(default)]
    pub ouid: Option<i64>,
    #[serde(default)]
    pub vertrags_adresse: Option<Adresse>,
    #[serde(default)]
    pub vertragskontonummer: Option<String>,
    #[serde(default)]
    pub rechnungsstellung: Option<Kontaktart>,
    #[serde(default)]
    pub vertrag: Option<Vertrag>,
    #[serde(default)]
    pub erstellungsdatum: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rechnungsdatum_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rechnungsdatum_naechstes: Option<DateTime<Utc>>,
}

/// Master contract account grouping the contract accounts of a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VertragskontoMba {
    #[serde(default)]
    pub ouid: Option<i64>,
    #[serde(default)]
    pub vertrags_adresse: Option<Adresse>,
    #[serde(default)]
    pub vertragskontonummer: Option<String>,
    #[serde(default)]
    pub rechnungsstellung: Option<Kontaktart>,
    #[serde(default)]
    pub cbas: Option<Vec<VertragskontoCba>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adresse_defaults_to_germany() {
        let adresse: Adresse = serde_json::from_str(r#"{"postleitzahl": "50667", "ort": "Köln"}"#).unwrap();
        assert_eq!(adresse.landescode, Some(Landescode::DE));
        assert_eq!(adresse.strasse, None);

        assert_eq!(Adresse::default().landescode, Some(Landescode::DE));
        assert_eq!(
            Adresse::po_box("50667", "Köln", "1234").with_landescode(Landescode::AT).landescode,
            Some(Landescode::AT)
        );
    }

    #[test]
    fn test_explicit_null_landescode_is_kept() {
        let adresse: Adresse =
            serde_json::from_str(r#"{"postleitzahl": null, "ort": null, "landescode": null}"#).unwrap();
        assert_eq!(adresse.landescode, None);
    }

    #[test]
    fn test_bankverbindung_from_partial_json() {
        let bank: Bankverbindung =
            serde_json::from_str(r#"{"iban": "DE52940594210000082271", "sepa_info": {"sepa_zahler": true}}"#).unwrap();
        assert_eq!(bank.sepa_info.unwrap().sepa_zahler, Some(true));
        assert_eq!(bank.bic, None);
    }
}
