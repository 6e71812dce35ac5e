//! E-mail address syntax validation.
//!
//! Only the syntax is checked; deliverability (DNS lookups) is out of scope.

use thiserror::Error;

const MAX_ADDRESS_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_LABEL_LENGTH: usize = 63;

/// Special characters allowed in the local part besides letters and digits.
const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

/// Reasons an e-mail address is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("The email address is not valid. It must have exactly one @-sign.")]
    AtSign,

    #[error("There must be something before the @-sign.")]
    EmptyLocalPart,

    #[error("There must be something after the @-sign.")]
    EmptyDomain,

    #[error("The email address is too long ({0} characters too many).")]
    TooLong(usize),

    #[error("The email address is too long before the @-sign ({0} characters too many).")]
    LocalPartTooLong(usize),

    #[error("The email address contains invalid characters before the @-sign: {0}.")]
    InvalidLocalCharacters(String),

    #[error("An email address cannot start with a period.")]
    LeadingPeriod,

    #[error("An email address cannot have a period immediately before the @-sign.")]
    TrailingPeriod,

    #[error("An email address cannot have two periods in a row.")]
    ConsecutivePeriods,

    #[error("The part after the @-sign contains invalid characters: {0}.")]
    InvalidDomainCharacters(String),

    #[error("The part after the @-sign is not valid. It should have a period.")]
    DomainWithoutPeriod,

    #[error("The part after the @-sign is not valid. {0}")]
    InvalidDomain(String),
}

fn invalid_chars(part: &str, allowed: impl Fn(char) -> bool) -> Option<String> {
    let mut invalid: Vec<char> = part.chars().filter(|c| !allowed(*c)).collect();
    if invalid.is_empty() {
        return None;
    }
    invalid.sort_unstable();
    invalid.dedup();
    Some(invalid.into_iter().map(|c| format!("'{}'", c)).collect::<Vec<_>>().join(", "))
}

fn is_atext(c: char) -> bool {
    c.is_alphanumeric() || ATEXT_SPECIALS.contains(c)
}

fn check_local_part(local: &str) -> Result<(), EmailError> {
    if local.is_empty() {
        return Err(EmailError::EmptyLocalPart);
    }
    let len = local.chars().count();
    if len > MAX_LOCAL_PART_LENGTH {
        return Err(EmailError::LocalPartTooLong(len - MAX_LOCAL_PART_LENGTH));
    }
    if let Some(chars) = invalid_chars(local, |c| is_atext(c) || c == '.') {
        return Err(EmailError::InvalidLocalCharacters(chars));
    }
    if local.starts_with('.') {
        return Err(EmailError::LeadingPeriod);
    }
    if local.ends_with('.') {
        return Err(EmailError::TrailingPeriod);
    }
    if local.contains("..") {
        return Err(EmailError::ConsecutivePeriods);
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<(), EmailError> {
    if domain.is_empty() {
        return Err(EmailError::EmptyDomain);
    }
    if let Some(chars) = invalid_chars(domain, |c| c.is_alphanumeric() || c == '-' || c == '.') {
        return Err(EmailError::InvalidDomainCharacters(chars));
    }
    if domain.starts_with('.') {
        return Err(EmailError::InvalidDomain("An email address cannot have a period immediately after the @-sign.".to_string()));
    }
    if domain.ends_with('.') {
        return Err(EmailError::InvalidDomain("An email address cannot end with a period.".to_string()));
    }
    if domain.contains("..") {
        return Err(EmailError::ConsecutivePeriods);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    for label in &labels {
        if label.starts_with('-') || label.ends_with('-') {
            return Err(EmailError::InvalidDomain(
                "A domain name label cannot start or end with a hyphen.".to_string(),
            ));
        }
        if label.chars().count() > MAX_LABEL_LENGTH {
            return Err(EmailError::InvalidDomain(format!(
                "The label '{}' is too long.",
                label
            )));
        }
    }

    if labels.len() < 2 {
        return Err(EmailError::DomainWithoutPeriod);
    }
    let tld = labels[labels.len() - 1];
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(EmailError::InvalidDomain(
            "It is not within a valid top-level domain.".to_string(),
        ));
    }
    Ok(())
}

/// Validate the syntax of an e-mail address.
pub fn validate_email(address: &str) -> Result<(), EmailError> {
    let len = address.chars().count();
    if len > MAX_ADDRESS_LENGTH {
        return Err(EmailError::TooLong(len - MAX_ADDRESS_LENGTH));
    }

    let mut parts = address.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(EmailError::AtSign);
    };

    check_local_part(local)?;
    check_domain(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        for address in [
            "test@test.com",
            "max.mustermann@example.de",
            "info+rechnung@stadtwerke-musterstadt.de",
            "jörg@müller.de",
            "o'brien@example.co.uk",
        ] {
            assert_eq!(validate_email(address), Ok(()), "{}", address);
        }
    }

    #[test]
    fn test_domain_needs_period() {
        let err = validate_email("test@test").unwrap_err();
        assert_eq!(err, EmailError::DomainWithoutPeriod);
        assert!(err
            .to_string()
            .contains("The part after the @-sign is not valid. It should have a period"));
    }

    #[test]
    fn test_at_sign() {
        assert_eq!(validate_email("test.example.com"), Err(EmailError::AtSign));
        assert_eq!(validate_email("a@b@example.com"), Err(EmailError::AtSign));
        assert_eq!(validate_email("@example.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(validate_email("test@"), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn test_local_part_rules() {
        assert_eq!(validate_email(".max@example.com"), Err(EmailError::LeadingPeriod));
        assert_eq!(validate_email("max.@example.com"), Err(EmailError::TrailingPeriod));
        assert_eq!(validate_email("max..m@example.com"), Err(EmailError::ConsecutivePeriods));
        assert_eq!(
            validate_email("max mustermann@example.com"),
            Err(EmailError::InvalidLocalCharacters("' '".to_string()))
        );

        let long_local = format!("{}@example.com", "a".repeat(70));
        assert_eq!(validate_email(&long_local), Err(EmailError::LocalPartTooLong(6)));
    }

    #[test]
    fn test_domain_rules() {
        assert!(matches!(validate_email("max@-example.com"), Err(EmailError::InvalidDomain(_))));
        assert!(matches!(validate_email("max@example.123"), Err(EmailError::InvalidDomain(_))));
        assert!(matches!(
            validate_email("max@exa_mple.com"),
            Err(EmailError::InvalidDomainCharacters(_))
        ));

        let long = format!("max@{}.com", "a".repeat(260));
        assert!(matches!(validate_email(&long), Err(EmailError::TooLong(_))));
    }
}
