//! Normalized email address
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("Parent@Example.COM").unwrap();
//! assert_eq!(email.as_str(), "parent@example.com");
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::errors::DomainError;

/// Email stored trimmed and lower-cased so lookups ignore case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if !normalized.validate_email() {
            return Err(DomainError::InvalidEmailAddress(raw.as_ref().to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_case_with_padding_is_normalized() {
        let email = EmailAddress::new("  Mari@Example.EE ").unwrap();
        assert_eq!(email.to_string(), "mari@example.ee");
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for raw in ["not-an-email", "@nodomain.com", ""] {
            assert!(
                matches!(EmailAddress::new(raw), Err(DomainError::InvalidEmailAddress(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn deserialization_runs_the_same_check() {
        let ok: EmailAddress = serde_json::from_str("\"Kai@Example.com\"").unwrap();
        assert_eq!(ok.as_str(), "kai@example.com");
        assert!(serde_json::from_str::<EmailAddress>("\"nope\"").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let email: EmailAddress = "test@example.com".try_into().unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"test@example.com\"");
    }
}
