//! BO4E business objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::com::{Adresse, ExterneReferenz, Messlokationszuordnung};
use crate::enums::{Anrede, Sparte};

/// A business partner with the additional fields required by the migration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeschaeftspartnerErweitert {
    #[serde(default)]
    pub name1: Option<String>,
    #[serde(default)]
    pub name2: Option<String>,
    #[serde(default)]
    pub name3: Option<String>,
    #[serde(default)]
    pub anrede: Option<Anrede>,
    #[serde(default)]
    pub gewerbekennzeichnung: Option<bool>,
    #[serde(default)]
    pub hrnummer: Option<String>,
    #[serde(default)]
    pub amtsgericht: Option<String>,
    #[serde(default)]
    pub e_mail_adresse: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub telefonnummer_privat: Option<String>,
    #[serde(default)]
    pub telefonnummer_geschaeft: Option<String>,
    #[serde(default)]
    pub telefonnummer_mobil: Option<String>,
    #[serde(default)]
    pub partneradresse: Option<Adresse>,
    #[serde(default)]
    pub externe_referenzen: Option<Vec<ExterneReferenz>>,
    #[serde(default)]
    pub erstellungsdatum: Option<DateTime<Utc>>,
    #[serde(default)]
    pub geburtstag: Option<DateTime<Utc>>,
}

impl GeschaeftspartnerErweitert {
    /// Value of the external reference named `name`, if any.
    pub fn externe_referenz(&self, name: &str) -> Option<&str> {
        self.externe_referenzen
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|r| r.ex_ref_name.as_deref() == Some(name))
            .and_then(|r| r.ex_ref_wert.as_deref())
    }
}

/// A contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Vertrag {
    #[serde(default)]
    pub vertragsnummer: Option<String>,
    #[serde(default)]
    pub beschreibung: Option<String>,
    #[serde(default)]
    pub sparte: Option<Sparte>,
    #[serde(default)]
    pub vertragsbeginn: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vertragsende: Option<DateTime<Utc>>,
}

/// A market location (MaLo), the unit energy is billed for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Marktlokation {
    #[serde(default)]
    pub marktlokations_id: Option<String>,
    #[serde(default)]
    pub sparte: Option<Sparte>,
    #[serde(default)]
    pub lokationsadresse: Option<Adresse>,
    #[serde(default)]
    pub zugehoerige_messlokation: Option<Messlokationszuordnung>,
}

/// A metering location (MeLo), the unit energy is measured at.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Messlokation {
    #[serde(default)]
    pub messlokations_id: Option<String>,
    #[serde(default)]
    pub sparte: Option<Sparte>,
    #[serde(default)]
    pub messadresse: Option<Adresse>,
}

/// A meter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Zaehler {
    #[serde(default)]
    pub zaehlernummer: Option<String>,
    #[serde(default)]
    pub sparte: Option<Sparte>,
}
