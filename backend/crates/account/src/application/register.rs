//! Register Use Case
//!
//! Creates a new account and issues its first credential.

use std::sync::Arc;

use platform::{password::ClearTextPassword, token};

use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{display_name::DisplayName, email::Email};
use crate::error::{AccountError, AccountResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub account: Account,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<RegisterOutput> {
        // Validate in field declaration order; the first failure wins
        let name = DisplayName::new(input.name)?;
        let email = Email::new(input.email)?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        // Pre-check uniqueness on the normalized email. Two concurrent
        // registrations can both pass this; the store's unique index is
        // the authority and create() maps that race to EmailTaken too.
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = password
            .hash()
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        let account = Account::new(name, email, password_hash);

        self.repo.create(&account).await?;

        let token = token::issue(
            &self.config.token_secret,
            &account.account_id.to_string(),
            self.config.token_ttl,
        );

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Account registered"
        );

        Ok(RegisterOutput { account, token })
    }
}
