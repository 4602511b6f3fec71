//! UI Theme Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// UI theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    #[display("light")]
    Light,
    #[display("dark")]
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Result<Self, AccountError> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(AccountError::Validation("Invalid theme".to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
