//! BO4E enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Form of address of a business partner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anrede {
    Herr,
    Frau,
    Eheleute,
    Firma,
    Familie,
    Erbengemeinschaft,
    Grundstuecksgemeinschaft,
    Individuell,
}

impl Anrede {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Herr => "HERR",
            Self::Frau => "FRAU",
            Self::Eheleute => "EHELEUTE",
            Self::Firma => "FIRMA",
            Self::Familie => "FAMILIE",
            Self::Erbengemeinschaft => "ERBENGEMEINSCHAFT",
            Self::Grundstuecksgemeinschaft => "GRUNDSTUECKSGEMEINSCHAFT",
            Self::Individuell => "INDIVIDUELL",
        }
    }
}

impl fmt::Display for Anrede {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ISO 3166-1 alpha-2 country codes used in the migration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Landescode {
    AT,
    BE,
    BG,
    CH,
    CY,
    CZ,
    #[default]
    DE,
    DK,
    EE,
    ES,
    FI,
    FR,
    GB,
    GR,
    HR,
    HU,
    IE,
    IS,
    IT,
    LI,
    LT,
    LU,
    LV,
    MC,
    MT,
    NL,
    NO,
    PL,
    PT,
    RO,
    SE,
    SI,
    SK,
    TR,
    US,
}

impl fmt::Display for Landescode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Preferred channel for invoices and correspondence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kontaktart {
    Anschreiben,
    Telefonat,
    Fax,
    EMail,
    Sms,
}

/// Energy division of a contract or location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sparte {
    Strom,
    Gas,
    Fernwaerme,
    Nahwaerme,
    Wasser,
    Abwasser,
    StromUndGas,
}

impl Sparte {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strom => "STROM",
            Self::Gas => "GAS",
            Self::Fernwaerme => "FERNWAERME",
            Self::Nahwaerme => "NAHWAERME",
            Self::Wasser => "WASSER",
            Self::Abwasser => "ABWASSER",
            Self::StromUndGas => "STROM_UND_GAS",
        }
    }
}

impl fmt::Display for Sparte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&Anrede::Herr).unwrap(), "\"HERR\"");
        assert_eq!(serde_json::to_string(&Kontaktart::EMail).unwrap(), "\"E_MAIL\"");
        assert_eq!(serde_json::to_string(&Sparte::StromUndGas).unwrap(), "\"STROM_UND_GAS\"");
        assert_eq!(serde_json::to_string(&Landescode::DE).unwrap(), "\"DE\"");

        let anrede: Anrede = serde_json::from_str("\"EHELEUTE\"").unwrap();
        assert_eq!(anrede, Anrede::Eheleute);
        assert!(serde_json::from_str::<Landescode>("\"XX\"").is_err());
    }

    #[test]
    fn test_display_matches_serialized_names() {
        assert_eq!(Anrede::Grundstuecksgemeinschaft.to_string(), "GRUNDSTUECKSGEMEINSCHAFT");
        assert_eq!(Sparte::Strom.to_string(), "STROM");
        assert_eq!(Landescode::GB.to_string(), "GB");
    }
}
