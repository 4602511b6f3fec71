//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository trait
//! - `application/` - Register / login / profile update use cases
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless signed bearer credentials (7-day expiry)
//! - Authenticated partial profile updates with a closed patch schema
//! - Global case-insensitive email uniqueness, race-safe at the store
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never serialized outward
//! - Token verification failures collapse to one unauthenticated outcome
//! - Auth endpoints rate limited per source IP

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::account_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
