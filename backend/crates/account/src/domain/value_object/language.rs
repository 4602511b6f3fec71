//! Language Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// UI language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish (the product default)
    #[default]
    #[display("es")]
    Es,
    /// English
    #[display("en")]
    En,
    /// Chinese
    #[display("cn")]
    Cn,
}

impl Language {
    pub fn parse(s: &str) -> Result<Self, AccountError> {
        match s {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            "cn" => Ok(Language::Cn),
            _ => Err(AccountError::Validation("Invalid language".to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Cn => "cn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for lang in [Language::Es, Language::En, Language::Cn] {
            assert_eq!(Language::parse(lang.as_str()).unwrap(), lang);
        }
        assert!(Language::parse("fr").is_err());
    }
}
