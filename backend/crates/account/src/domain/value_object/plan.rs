//! Subscription Plan Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Subscription plan
///
/// `Free` accounts carry no billing record and no consent; the entity
/// merge enforces that combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    #[display("free")]
    Free,
    #[display("premium")]
    Premium,
    #[display("business")]
    Business,
}

impl Plan {
    pub fn parse(s: &str) -> Result<Self, AccountError> {
        match s {
            "free" => Ok(Plan::Free),
            "premium" => Ok(Plan::Premium),
            "business" => Ok(Plan::Business),
            _ => Err(AccountError::Validation("Invalid plan".to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Premium => "premium",
            Plan::Business => "business",
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Plan::Free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for plan in [Plan::Free, Plan::Premium, Plan::Business] {
            assert_eq!(Plan::parse(plan.as_str()).unwrap(), plan);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Plan::parse("gold").is_err());
        assert!(Plan::parse("FREE").is_err());
    }

    #[test]
    fn test_default_is_free() {
        assert_eq!(Plan::default(), Plan::Free);
    }
}
