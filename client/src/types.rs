//! Wire Types
//!
//! Client-side mirror of the account representation the server returns.
//! Enumerated fields stay plain strings here; the server is the
//! authority on what is valid, the client just round-trips it.

use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// Account snapshot as the server serializes it.
///
/// A guest profile (never registered in this session) has an empty
/// `id`; the sync controller treats that as local-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub plan: String,
    pub style_preference: String,
    pub theme: String,
    pub language: String,
    #[serde(default)]
    pub consent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_date: Option<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub outfits: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl User {
    /// Local-only starting profile, used before any login/register
    pub fn guest() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            email: String::new(),
            plan: "free".to_string(),
            style_preference: "casual".to_string(),
            theme: "light".to_string(),
            language: "es".to_string(),
            consent: false,
            consent_date: None,
            favorites: Vec::new(),
            outfits: Vec::new(),
            billing: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Shallow-merge a patch object into this snapshot.
    ///
    /// Each key present in the patch replaces that field wholesale;
    /// absent keys are untouched. Keys outside the known schema are
    /// dropped (the server would reject them anyway).
    pub fn merged(&self, patch: &serde_json::Value) -> ClientResult<User> {
        let mut base = serde_json::to_value(self)?;
        if let (Some(obj), Some(patch_obj)) = (base.as_object_mut(), patch.as_object()) {
            for (key, value) in patch_obj {
                obj.insert(key.clone(), value.clone());
            }
        }
        Ok(serde_json::from_value(base)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_is_field_local() {
        let mut user = User::guest();
        user.favorites = vec!["p1".to_string()];

        let merged = user.merged(&json!({ "theme": "dark" })).unwrap();
        assert_eq!(merged.theme, "dark");
        assert_eq!(merged.favorites, vec!["p1"]);
        assert_eq!(merged.language, "es");
    }

    #[test]
    fn test_merge_replaces_collections_wholesale() {
        let mut user = User::guest();
        user.favorites = vec!["p1".to_string(), "p2".to_string()];

        let merged = user.merged(&json!({ "favorites": ["p9"] })).unwrap();
        assert_eq!(merged.favorites, vec!["p9"]);
    }

    #[test]
    fn test_parses_server_shape() {
        let user: User = serde_json::from_value(json!({
            "_id": "3f0f3a34-5a3e-4af9-b3f5-6f9f16b3e2aa",
            "name": "Ana",
            "email": "ana@test.com",
            "plan": "premium",
            "stylePreference": "sport",
            "theme": "dark",
            "language": "en",
            "consent": true,
            "consentDate": "2025-01-10T12:00:00Z",
            "favorites": ["p1"],
            "outfits": [],
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-10T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.style_preference, "sport");
        assert!(user.billing.is_none());
        assert_eq!(user.consent_date.as_deref(), Some("2025-01-10T12:00:00Z"));
    }
}
