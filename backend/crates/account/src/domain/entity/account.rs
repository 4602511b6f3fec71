//! Account Entity
//!
//! The authoritative user record. The password hash lives here but never
//! leaves through any outbound representation; sanitization happens in
//! the presentation layer, which simply does not map the field.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

use crate::domain::entity::outfit::Outfit;
use crate::domain::value_object::{
    account_id::AccountId, display_name::DisplayName, email::Email, language::Language, plan::Plan,
    style::StyleCategory, theme::Theme,
};
use crate::error::AccountError;

/// Billing sub-record, present only for paid plans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cif: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_rep: Option<String>,
}

impl Billing {
    /// Parse a billing patch value.
    pub fn parse(value: serde_json::Value) -> Result<Self, AccountError> {
        serde_json::from_value(value)
            .map_err(|e| AccountError::Validation(format!("Invalid billing: {e}")))
    }
}

/// Validated partial update to an account.
///
/// Fields left `None` are untouched by [`Account::apply`]; fields set
/// replace the stored value wholesale (billing included - this is a
/// field-level merge, not a deep one).
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<DisplayName>,
    pub email: Option<Email>,
    pub plan: Option<Plan>,
    pub style_preference: Option<StyleCategory>,
    pub theme: Option<Theme>,
    pub language: Option<Language>,
    pub consent: Option<bool>,
    pub consent_date: Option<DateTime<Utc>>,
    pub favorites: Option<Vec<String>>,
    pub outfits: Option<Vec<Outfit>>,
    pub billing: Option<Billing>,
}

/// Account entity
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: AccountId,
    pub name: DisplayName,
    /// Unique, normalized (trimmed + lowercased)
    pub email: Email,
    /// Write-only from the API surface
    pub password_hash: HashedPassword,
    pub plan: Plan,
    pub style_preference: StyleCategory,
    pub theme: Theme,
    pub language: Language,
    /// Paid-plan consent; `consent_date` is set iff this is true
    pub consent: bool,
    pub consent_date: Option<DateTime<Utc>>,
    /// Favorite product ids, order irrelevant
    pub favorites: Vec<String>,
    /// Saved outfits, most-recent-first
    pub outfits: Vec<Outfit>,
    /// Present only when plan is paid
    pub billing: Option<Billing>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with registration defaults
    pub fn new(name: DisplayName, email: Email, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            name,
            email,
            password_hash,
            plan: Plan::default(),
            style_preference: StyleCategory::default(),
            theme: Theme::default(),
            language: Language::default(),
            consent: false,
            consent_date: None,
            favorites: Vec::new(),
            outfits: Vec::new(),
            billing: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a validated patch into this account.
    ///
    /// Fields absent from the patch are untouched. After the merge the
    /// plan/consent/billing combination invariant is re-established, so
    /// every reachable state satisfies:
    /// - plan = free implies billing absent and consent = false
    /// - consent_date set iff consent
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(plan) = patch.plan {
            self.plan = plan;
        }
        if let Some(style) = patch.style_preference {
            self.style_preference = style;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(consent) = patch.consent {
            self.consent = consent;
        }
        if let Some(consent_date) = patch.consent_date {
            self.consent_date = Some(consent_date);
        }
        if let Some(favorites) = patch.favorites {
            self.favorites = favorites;
        }
        if let Some(outfits) = patch.outfits {
            self.outfits = outfits;
        }
        if let Some(billing) = patch.billing {
            self.billing = Some(billing);
        }

        self.enforce_invariants();
        self.updated_at = Utc::now();
    }

    /// Re-establish the plan/consent/billing combination invariant.
    ///
    /// Downgrading to free clears billing and consent together;
    /// withdrawing consent clears the consent date; granting consent
    /// without a supplied date stamps server time.
    fn enforce_invariants(&mut self) {
        if self.plan.is_free() {
            self.billing = None;
            self.consent = false;
        }

        if self.consent {
            if self.consent_date.is_none() {
                self.consent_date = Some(Utc::now());
            }
        } else {
            self.consent_date = None;
        }
    }
}
