//! Repository Trait
//!
//! Interface to the backing account store. The store is treated as an
//! opaque document collection reachable by unique key; implementations
//! live in the infrastructure layer.
//!
//! Uniqueness contract: `create` and `update` must fail with
//! `AccountError::EmailTaken` when the normalized email collides with
//! another account, even when a pre-write lookup raced and passed.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::AccountResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Persist a new account; email collisions are `EmailTaken`
    async fn create(&self, account: &Account) -> AccountResult<()>;

    /// Find an account by id
    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>>;

    /// Find an account by normalized email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>>;

    /// Check whether another account (excluding `exclude`) holds this email
    async fn exists_by_email_excluding(
        &self,
        email: &Email,
        exclude: &AccountId,
    ) -> AccountResult<bool>;

    /// Persist the full current state of an existing account.
    ///
    /// A single update is atomic at the document level; `AccountNotFound`
    /// when the id no longer exists, `EmailTaken` on a write-time email
    /// collision.
    async fn update(&self, account: &Account) -> AccountResult<()>;
}
