//! Display Name Value Object

use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Trimmed, non-empty display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Result<Self, AccountError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(AccountError::Validation("Name is required".to_string()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims() {
        assert_eq!(DisplayName::new("  Ana  ").unwrap().as_str(), "Ana");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(DisplayName::new("   ").is_err());
        assert!(DisplayName::new("").is_err());
    }
}
