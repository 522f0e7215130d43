use std::sync::Arc;

use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::ports::AccountRepository;

/// Read-only view of stored credentials.
pub struct CredentialStore<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> CredentialStore<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Look up an account by email, falling back to username.
    ///
    /// Each field is matched exactly. A miss is `Ok(None)`.
    pub async fn find_by_username_or_email(
        &self,
        value: &str,
    ) -> Result<Option<Account>, AccountError> {
        if let Some(account) = self.repository.find_by_email(value).await? {
            return Ok(Some(account));
        }

        self.repository.find_by_username(value).await
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `Password` - Stored hash cannot be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, AccountError> {
        Ok(self.authenticator.verify_password(password, stored_hash)?)
    }
}
