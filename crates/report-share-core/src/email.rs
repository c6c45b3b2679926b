//! Normalized email addresses.
//!
//! Every email that takes part in an allow-list comparison goes through
//! [`Email::normalize`], so two addresses that differ only in case or
//! surrounding whitespace are the same value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A lowercase, trimmed email address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize any input into an `Email`.
    ///
    /// Never fails. Malformed input is kept (lowercased and trimmed) so that
    /// it simply fails to match anything.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Normalize and check that the address has a plausible shape.
    ///
    /// Used when an owner configures an allow-list, not when a requester
    /// presents an identity.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = Self::normalize(raw);
        if email.is_well_formed() {
            Ok(email)
        } else {
            Err(ValidationError::InvalidEmail(raw.to_string()))
        }
    }

    /// Whether this looks like `local@domain`.
    pub fn is_well_formed(&self) -> bool {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !self.0.chars().any(char::is_whitespace)
            }
            None => false,
        }
    }

    /// Get the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Email {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for Email {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Email({})", self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(Email::normalize("  A@X.COM ").as_str(), "a@x.com");
        assert_eq!(Email::normalize("A@X.COM"), Email::normalize("a@x.com"));
    }

    #[test]
    fn test_normalize_never_fails() {
        assert_eq!(Email::normalize("not an email").as_str(), "not an email");
        assert_eq!(Email::normalize("").as_str(), "");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Email::parse("owner2@co.com").is_ok());
        assert!(Email::parse("no-at-sign").is_err());
        assert!(Email::parse("@co.com").is_err());
        assert!(Email::parse("a@").is_err());
        assert!(Email::parse("a@b@c").is_err());
        assert!(Email::parse("a b@c.com").is_err());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let email: Email = serde_json::from_str("\"Mixed@Case.Org\"").unwrap();
        assert_eq!(email.as_str(), "mixed@case.org");
    }
}
