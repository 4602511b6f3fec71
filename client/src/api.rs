//! Remote Account API
//!
//! Trait seam over the HTTP surface so the sync controller can be
//! exercised against a scripted fake; `HttpApi` is the real transport.

use serde::Deserialize;
use serde_json::json;

use crate::error::{ClientError, ClientResult};
use crate::types::User;

/// Successful register/login payload
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSuccess {
    pub user: User,
    pub token: String,
}

/// problem+json error body shape
#[derive(Debug, Deserialize)]
struct Problem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

/// Remote account operations
#[trait_variant::make(RemoteApi: Send)]
pub trait LocalRemoteApi {
    async fn register(&self, name: &str, email: &str, password: &str)
    -> ClientResult<AuthSuccess>;

    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSuccess>;

    /// PUT the patch for account `id`; returns the server's merged account
    async fn update_user(
        &self,
        id: &str,
        token: &str,
        patch: &serde_json::Value,
    ) -> ClientResult<User>;
}

/// reqwest-backed implementation
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Decode a success body, or turn a problem+json error body into
    /// [`ClientError::Api`].
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<Problem>().await {
            Ok(problem) if !problem.detail.is_empty() => problem.detail,
            Ok(problem) if !problem.title.is_empty() => problem.title,
            _ => "Request failed".to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl RemoteApi for HttpApi {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthSuccess> {
        let response = self
            .http
            .post(format!("{}/api/register", self.base_url))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSuccess> {
        let response = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_user(
        &self,
        id: &str,
        token: &str,
        patch: &serde_json::Value,
    ) -> ClientResult<User> {
        let response = self
            .http
            .put(format!("{}/api/user/{}", self.base_url, id))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;
        Self::decode(response).await
    }
}
