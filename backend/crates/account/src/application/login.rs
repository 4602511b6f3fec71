//! Login Use Case
//!
//! Authenticates an account and issues a fresh credential.

use std::sync::Arc;

use platform::token;

use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub account: Account,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let email = Email::new(input.email)?;

        if input.password.is_empty() {
            return Err(AccountError::Validation("Password is required".to_string()));
        }

        // Unknown email is a distinct outcome (NotFound); a present email
        // with a wrong password is InvalidCredentials. Beyond that split
        // nothing about the account is revealed.
        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        if !account.password_hash.verify(&input.password) {
            return Err(AccountError::InvalidCredentials);
        }

        let token = token::issue(
            &self.config.token_secret,
            &account.account_id.to_string(),
            self.config.token_ttl,
        );

        tracing::info!(account_id = %account.account_id, "Account logged in");

        Ok(LoginOutput { account, token })
    }
}
