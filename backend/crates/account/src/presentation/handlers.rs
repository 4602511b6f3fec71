//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateProfileUseCase,
};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use crate::presentation::middleware::AuthPrincipal;

/// Shared state for account handlers
pub struct AccountAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

impl<R> Clone for AccountAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Decode a request body into a typed DTO.
///
/// Bodies come in as raw JSON so schema failures map to the 400
/// validation shape instead of the framework's deserialization reply.
fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> AccountResult<T> {
    serde_json::from_value(body).map_err(|e| AccountError::Validation(e.to_string()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    Json(body): Json<serde_json::Value>,
) -> AccountResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let req: RegisterRequest = decode(body)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(&output.account),
            token: output.token,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(body): Json<serde_json::Value>,
) -> AccountResult<Json<AuthResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let req: LoginRequest = decode(body)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(&output.account),
        token: output.token,
    }))
}

// ============================================================================
// Update Profile
// ============================================================================

/// PUT /user/{id}
///
/// Ownership is checked before the body is validated, so a cross-account
/// request is 403 no matter what it carries.
pub async fn update_profile<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<String>,
    Extension(principal): Extension<AuthPrincipal>,
    Json(body): Json<serde_json::Value>,
) -> AccountResult<Json<UserResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let target = AccountId::parse(&id)?;

    if principal.account_id != target {
        return Err(AccountError::Forbidden);
    }

    let req: UpdateProfileRequest = decode(body)?;
    let patch = req.validate()?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let account = use_case
        .execute(&principal.account_id, &target, patch)
        .await?;

    Ok(Json(UserResponse::from(&account)))
}
