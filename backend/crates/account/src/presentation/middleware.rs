//! Auth and Rate Limit Middleware
//!
//! Credential verification for protected routes and per-source
//! throttling for the credential-issuing routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client::extract_client_ip;
use platform::rate_limit::SlidingWindowLimiter;
use platform::token;

use crate::application::config::AccountConfig;
use crate::domain::value_object::account_id::AccountId;
use crate::error::AccountError;

/// Verified caller identity, inserted into request extensions by
/// [`require_bearer`]
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal {
    pub account_id: AccountId,
}

/// State for the bearer-token gate
#[derive(Clone)]
pub struct AuthGateState {
    pub config: Arc<AccountConfig>,
}

/// Middleware requiring a valid `Authorization: Bearer <token>` header.
///
/// Every failure (missing header, malformed token, bad signature,
/// expired, unparseable subject) collapses to the same 401; the
/// distinction lives in debug logs only.
pub async fn require_bearer(
    State(state): State<AuthGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        tracing::debug!("Missing bearer token");
        return Err(AccountError::Unauthenticated.into_response());
    };

    let subject = match token::verify(&state.config.token_secret, token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!(reason = %e, "Token rejected");
            return Err(AccountError::Unauthenticated.into_response());
        }
    };

    let account_id = match AccountId::parse(&subject) {
        Ok(id) => id,
        Err(_) => {
            tracing::debug!("Token subject is not an account id");
            return Err(AccountError::Unauthenticated.into_response());
        }
    };

    req.extensions_mut().insert(AuthPrincipal { account_id });

    Ok(next.run(req).await)
}

/// State for the auth-endpoint rate limit
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<SlidingWindowLimiter>,
}

/// Middleware throttling requests per source IP.
///
/// The key is the first X-Forwarded-For entry when present, else the
/// socket peer address. Sources with neither share one bucket.
pub async fn rate_limit_auth(
    State(state): State<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let key = extract_client_ip(req.headers(), direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let result = state.limiter.check(&key);
    if !result.allowed {
        tracing::warn!(source = %key, "Auth rate limit hit");
        return Err(AccountError::RateLimited.into_response());
    }

    Ok(next.run(req).await)
}
