//! In-Memory Repository Implementation
//!
//! Backs unit tests and local development without PostgreSQL. Honors the
//! same uniqueness contract as the real store: email collisions at write
//! time surface as `EmailTaken`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::{AccountError, AccountResult};

/// Mutex-guarded map of accounts keyed by id
#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AccountError::EmailTaken);
        }

        accounts.insert(*account.account_id.as_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(accounts.get(account_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn exists_by_email_excluding(
        &self,
        email: &Email,
        exclude: &AccountId,
    ) -> AccountResult<bool> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        Ok(accounts
            .values()
            .any(|a| &a.email == email && &a.account_id != exclude))
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());

        if accounts
            .values()
            .any(|a| a.email == account.email && a.account_id != account.account_id)
        {
            return Err(AccountError::EmailTaken);
        }

        match accounts.get_mut(account.account_id.as_uuid()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(AccountError::AccountNotFound),
        }
    }
}
