//! Account Router

use axum::{
    Router, middleware,
    routing::{post, put},
};
use std::sync::Arc;

use platform::rate_limit::{RateLimitConfig, SlidingWindowLimiter};

use crate::application::config::AccountConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::{
    AuthGateState, RateLimitState, rate_limit_auth, require_bearer,
};

/// Credential-issuing routes allow 30 requests per source IP per
/// 15-minute window
const AUTH_RATE_LIMIT_MAX: u32 = 30;
const AUTH_RATE_LIMIT_WINDOW_SECS: u64 = 900;

/// Create the account router with the PostgreSQL repository
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create an account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    let config = Arc::new(config);

    let state = AccountAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    let limiter = Arc::new(SlidingWindowLimiter::new(RateLimitConfig::new(
        AUTH_RATE_LIMIT_MAX,
        AUTH_RATE_LIMIT_WINDOW_SECS,
    )));

    let auth_routes = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route_layer(middleware::from_fn_with_state(
            RateLimitState { limiter },
            rate_limit_auth,
        ));

    let user_routes = Router::new()
        .route("/user/{id}", put(handlers::update_profile::<R>))
        .route_layer(middleware::from_fn_with_state(
            AuthGateState { config },
            require_bearer,
        ));

    Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .with_state(state)
}
