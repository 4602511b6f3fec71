//! Style Category Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Clothing style category, used both as an account preference and as a
/// product attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    #[default]
    #[display("casual")]
    Casual,
    #[display("sport")]
    Sport,
    #[display("elegant")]
    Elegant,
    #[display("informal")]
    Informal,
    #[display("work")]
    Work,
}

impl StyleCategory {
    pub fn parse(s: &str) -> Result<Self, AccountError> {
        match s {
            "casual" => Ok(StyleCategory::Casual),
            "sport" => Ok(StyleCategory::Sport),
            "elegant" => Ok(StyleCategory::Elegant),
            "informal" => Ok(StyleCategory::Informal),
            "work" => Ok(StyleCategory::Work),
            _ => Err(AccountError::Validation(
                "Invalid stylePreference".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCategory::Casual => "casual",
            StyleCategory::Sport => "sport",
            StyleCategory::Elegant => "elegant",
            StyleCategory::Informal => "informal",
            StyleCategory::Work => "work",
        }
    }
}
