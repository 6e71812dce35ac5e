//! Banking identifiers: IBAN and BIC.

use std::sync::LazyLock;

use iban::Iban;
use regex::Regex;
use thiserror::Error;

/// Reasons an IBAN or BIC is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankingError {
    #[error("Invalid characters")]
    InvalidCharacters,

    #[error("Invalid country code '{0}'")]
    InvalidCountryCode(String),

    #[error("Invalid length '{0}'")]
    InvalidLength(usize),

    #[error("Invalid checksum digits")]
    InvalidChecksum,

    #[error("Invalid structure")]
    InvalidStructure,

    #[error("Invalid account number format for country '{0}'")]
    InvalidBban(String),
}

/// IBAN lengths per country, from the SWIFT IBAN registry.
const IBAN_LENGTHS: &[(&str, usize)] = &[
    ("AD", 24), ("AE", 23), ("AL", 28), ("AT", 20), ("AZ", 28), ("BA", 20), ("BE", 16),
    ("BG", 22), ("BH", 22), ("BR", 29), ("BY", 28), ("CH", 21), ("CR", 22), ("CY", 28),
    ("CZ", 24), ("DE", 22), ("DK", 18), ("DO", 28), ("EE", 20), ("EG", 29), ("ES", 24),
    ("FI", 18), ("FO", 18), ("FR", 27), ("GB", 22), ("GE", 22), ("GI", 23), ("GL", 18),
    ("GR", 27), ("GT", 28), ("HR", 21), ("HU", 28), ("IE", 22), ("IL", 23), ("IQ", 23),
    ("IS", 26), ("IT", 27), ("JO", 30), ("KW", 30), ("KZ", 20), ("LB", 28), ("LC", 32),
    ("LI", 21), ("LT", 20), ("LU", 20), ("LV", 21), ("MC", 27), ("MD", 24), ("ME", 22),
    ("MK", 19), ("MR", 27), ("MT", 31), ("MU", 30), ("NL", 18), ("NO", 15), ("PK", 24),
    ("PL", 28), ("PS", 29), ("PT", 25), ("QA", 29), ("RO", 24), ("RS", 22), ("SA", 24),
    ("SC", 31), ("SE", 24), ("SI", 19), ("SK", 24), ("SM", 27), ("ST", 25), ("SV", 28),
    ("TL", 23), ("TN", 24), ("TR", 26), ("UA", 29), ("VA", 22), ("VG", 24), ("XK", 20),
];

static BIC_STRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("BIC regex is valid")
});

/// Expected IBAN length for a country, if the country uses IBANs.
pub fn iban_length(country_code: &str) -> Option<usize> {
    IBAN_LENGTHS
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, len)| *len)
}

/// Remove spaces and convert to upper case.
pub fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Validate an IBAN: characters, country, length, ISO 7064 mod 97-10 checksum
/// and the country-specific BBAN format of the IBAN registry.
pub fn validate_iban(iban: &str) -> Result<(), BankingError> {
    let iban = compact(iban);
    if iban.is_empty() || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BankingError::InvalidCharacters);
    }

    let country_code: String = iban.chars().take(2).collect();
    let expected = iban_length(&country_code).ok_or(BankingError::InvalidCountryCode(country_code))?;
    if iban.len() != expected {
        return Err(BankingError::InvalidLength(iban.len()));
    }
    if !iban[2..4].chars().all(|c| c.is_ascii_digit()) {
        return Err(BankingError::InvalidChecksum);
    }

    if mod97(&iban[4..], &iban[..4]) != 1 {
        return Err(BankingError::InvalidChecksum);
    }

    iban.parse::<Iban>()
        .map(|_| ())
        .map_err(|_| BankingError::InvalidBban(iban[..2].to_string()))
}

/// Remainder of `bban + country + check digits` (letters as two-digit numbers) modulo 97.
fn mod97(bban: &str, head: &str) -> u32 {
    bban.chars().chain(head.chars()).fold(0u32, |remainder, c| {
        // Letters expand to two digits: A=10 .. Z=35
        let value = c.to_digit(36).unwrap_or(0);
        let shift = if value >= 10 { 100 } else { 10 };
        (remainder * shift + value) % 97
    })
}

/// Validate a BIC: 8 or 11 characters with bank, country, location and
/// optional branch code.
pub fn validate_bic(bic: &str) -> Result<(), BankingError> {
    let bic = compact(bic);
    if !bic.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BankingError::InvalidCharacters);
    }
    if bic.len() != 8 && bic.len() != 11 {
        return Err(BankingError::InvalidLength(bic.len()));
    }
    if !BIC_STRUCTURE.is_match(&bic) {
        return Err(BankingError::InvalidStructure);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ibans() {
        for iban in [
            "DE52940594210000082271",
            "DE89 3704 0044 0532 0130 00",
            "GB82WEST12345698765432",
            "NL91ABNA0417164300",
            "at611904300234573201",
        ] {
            assert_eq!(validate_iban(iban), Ok(()), "{}", iban);
        }
    }

    #[test]
    fn test_invalid_ibans() {
        assert_eq!(validate_iban("DE42940594210000082271"), Err(BankingError::InvalidChecksum));
        assert_eq!(validate_iban("DE5294059421000008227"), Err(BankingError::InvalidLength(21)));
        assert_eq!(
            validate_iban("XX52940594210000082271"),
            Err(BankingError::InvalidCountryCode("XX".to_string()))
        );
        assert_eq!(validate_iban("DE52-9405"), Err(BankingError::InvalidCharacters));
        assert_eq!(validate_iban(""), Err(BankingError::InvalidCharacters));
        assert_eq!(validate_iban("DEAB940594210000082271"), Err(BankingError::InvalidChecksum));
    }

    #[test]
    fn test_iban_with_valid_checksum_but_malformed_account() {
        // German BBANs are 8 digits bank code plus 10 digits account number
        assert_eq!(
            validate_iban("DE85ABCDEFGH0123456789"),
            Err(BankingError::InvalidBban("DE".to_string()))
        );
        assert_eq!(
            BankingError::InvalidBban("DE".to_string()).to_string(),
            "Invalid account number format for country 'DE'"
        );
    }

    #[test]
    fn test_bic() {
        assert_eq!(validate_bic("TESTDETT421"), Ok(()));
        assert_eq!(validate_bic("COBADEFF"), Ok(()));
        assert_eq!(validate_bic("TESTDETT4321"), Err(BankingError::InvalidLength(12)));
        assert_eq!(validate_bic("1ESTDETT"), Err(BankingError::InvalidStructure));
        assert_eq!(validate_bic("TEST-ETT"), Err(BankingError::InvalidCharacters));
        assert_eq!(
            BankingError::InvalidLength(12).to_string(),
            "Invalid length '12'"
        );
    }
}
