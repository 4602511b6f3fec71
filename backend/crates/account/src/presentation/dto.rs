//! Data Transfer Objects
//!
//! Inbound request bodies and outbound representations. The outbound
//! account shape never maps the password hash; there is no path from
//! the stored credential to a response body.
//!
//! Registration and login bodies tolerate unknown keys (they are
//! dropped). The profile patch schema is closed: any unrecognized key
//! rejects the whole request, so a client typo can never silently
//! no-op a field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::account::{Account, Billing, ProfilePatch};
use crate::domain::entity::outfit::{Outfit, parse_outfits};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, language::Language, plan::Plan, style::StyleCategory,
    theme::Theme,
};
use crate::error::{AccountError, AccountResult};

// ============================================================================
// Requests
// ============================================================================

/// POST /register body.
///
/// Fields default to empty so a missing field reports the same message
/// as an empty one ("Name is required" rather than a serde error).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// PUT /user/{id} body. Closed schema; every field optional.
///
/// Scalar fields arrive as loose strings and are validated by
/// [`validate`](Self::validate) in declaration order, so the response
/// carries the first failing field's message only. Nested values
/// (outfits, billing) stay raw JSON until their turn in that order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub style_preference: Option<String>,
    pub theme: Option<String>,
    pub language: Option<String>,
    pub consent: Option<bool>,
    pub consent_date: Option<String>,
    pub favorites: Option<Vec<String>>,
    pub outfits: Option<serde_json::Value>,
    pub billing: Option<serde_json::Value>,
}

impl UpdateProfileRequest {
    /// Validate every present field into a typed patch.
    pub fn validate(self) -> AccountResult<ProfilePatch> {
        let mut patch = ProfilePatch::default();

        if let Some(name) = self.name {
            patch.name = Some(DisplayName::new(name)?);
        }
        if let Some(email) = self.email {
            patch.email = Some(Email::new(email)?);
        }
        if let Some(plan) = self.plan {
            patch.plan = Some(Plan::parse(&plan)?);
        }
        if let Some(style) = self.style_preference {
            patch.style_preference = Some(StyleCategory::parse(&style)?);
        }
        if let Some(theme) = self.theme {
            patch.theme = Some(Theme::parse(&theme)?);
        }
        if let Some(language) = self.language {
            patch.language = Some(Language::parse(&language)?);
        }
        patch.consent = self.consent;
        if let Some(date) = self.consent_date {
            let parsed = DateTime::parse_from_rfc3339(&date)
                .map_err(|_| AccountError::Validation("Invalid consentDate".to_string()))?;
            patch.consent_date = Some(parsed.with_timezone(&Utc));
        }
        patch.favorites = self.favorites;
        if let Some(outfits) = self.outfits {
            patch.outfits = Some(parse_outfits(outfits)?);
        }
        if let Some(billing) = self.billing {
            patch.billing = Some(Billing::parse(billing)?);
        }

        Ok(patch)
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Outbound account representation.
///
/// The id key is `_id` for compatibility with existing clients. The
/// password hash has no field here by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub style_preference: StyleCategory,
    pub theme: Theme,
    pub language: Language,
    pub consent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_date: Option<DateTime<Utc>>,
    pub favorites: Vec<String>,
    pub outfits: Vec<Outfit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Billing>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for UserResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.to_string(),
            name: account.name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            plan: account.plan,
            style_preference: account.style_preference,
            theme: account.theme,
            language: account.language,
            consent: account.consent,
            consent_date: account.consent_date,
            favorites: account.favorites.clone(),
            outfits: account.outfits.clone(),
            billing: account.billing.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Response for register and login: the sanitized account plus a fresh
/// credential.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}
