use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateProfileCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::authentication::models::Identity;

/// Youngest age, in whole years, allowed to register.
pub const MINIMUM_AGE: u32 = 14;

/// Domain service implementation for account operations.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        let today = Utc::now().date_naive();

        if command.birth_date.age_on(today) < MINIMUM_AGE {
            return Err(AccountError::AgeRestriction {
                minimum_age: MINIMUM_AGE,
            });
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateEmail(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(command.username.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateUsername(command.username.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            full_name: command.full_name,
            cellphone: command.cellphone,
            email: command.email,
            birth_date: command.birth_date.date(),
            password_hash,
            bio: command.bio,
            photo: command.photo,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, username = %created.username, "Account registered");

        Ok(created)
    }

    async fn get_account(&self, username: &str) -> Result<Account, AccountError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    async fn update_profile(
        &self,
        actor: &Identity,
        username: &str,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError> {
        if actor.subject() != username {
            return Err(AccountError::Forbidden(username.to_string()));
        }

        let mut account = self.get_account(username).await?;

        if let Some(bio) = command.bio {
            account.bio = Some(bio);
        }

        if let Some(photo) = command.photo {
            account.photo = Some(photo);
        }

        if let Some(cellphone) = command.cellphone {
            account.cellphone = cellphone;
        }

        let updated = self.repository.update(account).await?;
        tracing::debug!(account_id = %updated.id, "Profile updated");

        Ok(updated)
    }
}
