use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::authentication::models::Identity;

/// Port for credential checks and token issuance.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token for the account's username.
    ///
    /// # Arguments
    /// * `username_or_email` - Email address or username, matched exactly
    /// * `password` - Plaintext password
    ///
    /// # Errors
    /// * `NotFound` - No account matches
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is unreadable
    async fn login(&self, username_or_email: &str, password: &str) -> Result<String, AccountError>;

    /// Verify credentials without issuing a token.
    ///
    /// # Errors
    /// Same as [`AuthServicePort::login`].
    async fn authenticate(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<Identity, AccountError>;

    /// Issue a token for an identity established earlier in the request.
    fn issue_token(&self, identity: &Identity) -> Result<String, AccountError>;
}
