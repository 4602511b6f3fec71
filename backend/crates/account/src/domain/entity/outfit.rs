//! Outfit and Product Snapshots
//!
//! An outfit is a saved combination of exactly one top, one bottom and
//! one pair of shoes, each captured as a product snapshot at save time.
//! The account stores these verbatim; the sync core does not care how
//! they were generated, only that they match this shape.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::style::StyleCategory;
use crate::error::AccountError;

/// Product slot within an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[display("top")]
    Top,
    #[display("bottom")]
    Bottom,
    #[display("shoes")]
    Shoes,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Top => "top",
            ProductType::Bottom => "bottom",
            ProductType::Shoes => "shoes",
        }
    }
}

/// Catalog product snapshot embedded in an outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: ProductType,
    pub style: StyleCategory,
    pub image: String,
    pub url: String,
}

/// Saved outfit snapshot
///
/// The account keeps outfits most-recent-first; this type does not
/// enforce the ordering, the writer does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    pub id: String,
    pub top: Product,
    pub bottom: Product,
    pub shoes: Product,
    pub date_created: String,
}

/// Parse an outfits patch value into typed snapshots.
///
/// Used by patch validation so the failure message stays a single
/// first-error string.
pub fn parse_outfits(value: serde_json::Value) -> Result<Vec<Outfit>, AccountError> {
    serde_json::from_value(value)
        .map_err(|e| AccountError::Validation(format!("Invalid outfits: {e}")))
}
