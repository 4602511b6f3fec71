//! Account ID Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::AccountError;

/// Opaque unique account identifier (UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a path/claim string; failures are the caller's "invalid id"
    pub fn parse(s: &str) -> Result<Self, AccountError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AccountError::InvalidAccountId)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(AccountId::new(), AccountId::new());
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = AccountId::new();
        let parsed = AccountId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            AccountId::parse("not-a-uuid"),
            Err(AccountError::InvalidAccountId)
        ));
    }
}
