//! Update Profile Use Case
//!
//! Authorizes and applies a validated partial patch to an account.

use std::sync::Arc;

use crate::domain::entity::account::{Account, ProfilePatch};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Apply `patch` to `target` on behalf of `requester`.
    ///
    /// The requester must be the target; there is no administrative
    /// override. Returns the fully merged account.
    pub async fn execute(
        &self,
        requester: &AccountId,
        target: &AccountId,
        patch: ProfilePatch,
    ) -> AccountResult<Account> {
        if requester != target {
            tracing::warn!(
                requester = %requester,
                target = %target,
                "Cross-account profile update rejected"
            );
            return Err(AccountError::Forbidden);
        }

        // Email changes re-check global uniqueness, excluding the target
        // itself so re-submitting the current email is not a conflict.
        if let Some(email) = &patch.email {
            if self.repo.exists_by_email_excluding(email, target).await? {
                return Err(AccountError::EmailTaken);
            }
        }

        let mut account = self
            .repo
            .find_by_id(target)
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        account.apply(patch);

        // update() re-raises a write-time email race as EmailTaken and a
        // vanished target as AccountNotFound
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Profile updated");

        Ok(account)
    }
}
