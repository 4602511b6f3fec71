//! Email Value Object
//!
//! A normalized, format-checked email address. Normalization (trim +
//! lowercase) happens at construction, so equality and store lookups are
//! case- and whitespace-insensitive by definition.

use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new email, normalizing and validating the input
    pub fn new(email: impl Into<String>) -> Result<Self, AccountError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH || !Self::is_valid_format(&email) {
            return Err(AccountError::Validation("Invalid email format".to_string()));
        }

        Ok(Self(email))
    }

    /// Basic RFC-shape validation
    fn is_valid_format(email: &str) -> bool {
        // Exactly one @
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if domain.contains('@') {
            return false;
        }

        // Local part checks
        if local.is_empty() || local.len() > 64 {
            return false;
        }

        // Domain checks
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return false;
        }

        !email.chars().any(char::is_whitespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::new(" Ana@Test.com ").unwrap();
        assert_eq!(email.as_str(), "ana@test.com");
    }

    #[test]
    fn test_case_variants_are_equal() {
        assert_eq!(
            Email::new("ANA@TEST.COM").unwrap(),
            Email::new("ana@test.com ").unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for bad in [
            "",
            "no-at-sign",
            "@missing-local.com",
            "missing-domain@",
            "two@@ats.com",
            "no-dot@domain",
            "dot-edge@.domain.com",
            "spaces in@local.com",
        ] {
            assert!(Email::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(Email::new("ana@test.com").is_ok());
        assert!(Email::new("first.last+tag@sub.domain.co").is_ok());
    }
}
