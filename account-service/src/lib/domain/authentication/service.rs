use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::authentication::credentials::CredentialStore;
use crate::authentication::models::Identity;
use crate::authentication::ports::AuthServicePort;

/// Domain service implementation for logins.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    credentials: CredentialStore<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password verification and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            credentials: CredentialStore::new(repository, Arc::clone(&authenticator)),
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AuthServicePort for AuthService<AR>
where
    AR: AccountRepository,
{
    async fn login(&self, username_or_email: &str, password: &str) -> Result<String, AccountError> {
        let identity = self.authenticate(username_or_email, password).await?;
        let token = self.issue_token(&identity)?;

        tracing::info!(username = %identity.subject(), "Login successful");

        Ok(token)
    }

    async fn authenticate(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<Identity, AccountError> {
        let account = self
            .credentials
            .find_by_username_or_email(username_or_email)
            .await?
            .ok_or_else(|| AccountError::NotFound(username_or_email.to_string()))?;

        if !self
            .credentials
            .verify_password(password, &account.password_hash)?
        {
            tracing::debug!(username = %account.username, "Password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(Identity::new(account.username.as_str()))
    }

    fn issue_token(&self, identity: &Identity) -> Result<String, AccountError> {
        Ok(self.authenticator.generate_token(identity.subject())?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::account::models::Account;
    use crate::account::models::AccountId;
    use crate::account::models::EmailAddress;
    use crate::account::models::FullName;
    use crate::account::models::PhoneNumber;
    use crate::account::models::Username;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
            async fn update(&self, account: Account) -> Result<Account, AccountError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::with_hasher(
            b"test_secret_key_at_least_32_bytes!",
            chrono::Duration::hours(1),
            auth::PasswordHasher::with_params(1024, 1, 1).unwrap(),
        ))
    }

    fn account_with_password(authenticator: &Authenticator, password: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            full_name: FullName::new("Alice Liddell".to_string()).unwrap(),
            cellphone: PhoneNumber::new("3001234567".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            bio: None,
            photo: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_login_by_email() {
        let authenticator = authenticator();
        let account = account_with_password(&authenticator, "Secret1#");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        repository.expect_find_by_username().times(0);

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service.login("alice@example.com", "Secret1#").await.unwrap();
        assert_eq!(authenticator.validate_token(&token), Ok("alice".to_string()));
    }

    #[tokio::test]
    async fn test_login_falls_back_to_username() {
        let authenticator = authenticator();
        let account = account_with_password(&authenticator, "Secret1#");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), Arc::clone(&authenticator));

        let token = service.login("alice", "Secret1#").await.unwrap();
        assert!(authenticator.token_codec().is_valid(&token, "alice"));
    }

    #[tokio::test]
    async fn test_login_unknown_account() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));
        repository.expect_find_by_username().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.login("nobody", "Secret1#").await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let authenticator = authenticator();
        let account = account_with_password(&authenticator, "Secret1#");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.login("alice@example.com", "Wrong1#xx").await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_authenticate_returns_identity_without_authorities() {
        let authenticator = authenticator();
        let account = account_with_password(&authenticator, "Secret1#");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let identity = service
            .authenticate("alice@example.com", "Secret1#")
            .await
            .unwrap();
        assert_eq!(identity.subject(), "alice");
        assert!(identity.authorities().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_not_a_mismatch() {
        let authenticator = authenticator();
        let mut account = account_with_password(&authenticator, "Secret1#");
        account.password_hash = "plaintext".to_string();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.authenticate("alice@example.com", "Secret1#").await;
        assert!(matches!(result.unwrap_err(), AccountError::Password(_)));
    }
}
