//! Account Error Types
//!
//! Account-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Malformed or out-of-schema input; carries the first failing
    /// field's message only
    #[error("{0}")]
    Validation(String),

    /// Target id is not a recognizable account id
    #[error("Invalid user id")]
    InvalidAccountId,

    /// Login password mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired or forged credential. Sub-kinds are
    /// never distinguished to the caller.
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated but not entitled to the target account
    #[error("Forbidden")]
    Forbidden,

    /// Target account does not exist
    #[error("User not found")]
    AccountNotFound,

    /// Normalized email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Auth attempt limit exceeded
    #[error("Too many authentication attempts, please try again later")]
    RateLimited,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation(_)
            | AccountError::InvalidAccountId
            | AccountError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AccountError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccountError::Forbidden => StatusCode::FORBIDDEN,
            AccountError::AccountNotFound => StatusCode::NOT_FOUND,
            AccountError::EmailTaken => StatusCode::CONFLICT,
            AccountError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_)
            | AccountError::InvalidAccountId
            | AccountError::InvalidCredentials => ErrorKind::BadRequest,
            AccountError::Unauthenticated => ErrorKind::Unauthorized,
            AccountError::Forbidden => ErrorKind::Forbidden,
            AccountError::AccountNotFound => ErrorKind::NotFound,
            AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::RateLimited => ErrorKind::TooManyRequests,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        // 5xx details stay in the logs; the response body is generic
        if self.kind().is_server_error() {
            AppError::new(self.kind(), "Internal server error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::RateLimited => {
                tracing::warn!("Auth rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}
