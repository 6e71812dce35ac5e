//! Market location ids (MaLo-IDs).
//!
//! A MaLo-ID has 11 digits. The first digit is not zero and the last digit is
//! a check digit over the first ten.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static MALO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d{10}$").expect("MaLo-ID regex is valid"));

/// Reasons a MaLo-ID is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaloIdError {
    #[error("'{0}' does not match the pattern of a MaLo-ID (11 digits, not starting with 0)")]
    Format(String),

    #[error("The check digit of '{id}' is invalid, expected {expected}")]
    CheckDigit { id: String, expected: u32 },
}

/// Check digit over the first ten digits: digits at odd positions count once,
/// digits at even positions twice.
pub fn check_digit(first_ten: &str) -> Option<u32> {
    let digits: Vec<u32> = first_ten.chars().map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    if digits.len() != 10 {
        return None;
    }

    let odd: u32 = digits.iter().step_by(2).sum();
    let even: u32 = digits.iter().skip(1).step_by(2).sum();
    Some((10 - (odd + 2 * even) % 10) % 10)
}

/// Validate a MaLo-ID.
pub fn validate_marktlokations_id(id: &str) -> Result<(), MaloIdError> {
    if !MALO_ID.is_match(id) {
        return Err(MaloIdError::Format(id.to_string()));
    }

    let expected = check_digit(&id[..10]).ok_or_else(|| MaloIdError::Format(id.to_string()))?;
    let actual = id[10..].chars().next().and_then(|c| c.to_digit(10));
    if actual != Some(expected) {
        return Err(MaloIdError::CheckDigit {
            id: id.to_string(),
            expected,
        });
    }
    Ok(())
}

/// A validated MaLo-ID. Invalid ids are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MaloId(String);

impl MaloId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MaloId {
    type Error = MaloIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_marktlokations_id(&value)?;
        Ok(Self(value))
    }
}

impl From<MaloId> for String {
    fn from(id: MaloId) -> Self {
        id.0
    }
}

impl fmt::Display for MaloId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
