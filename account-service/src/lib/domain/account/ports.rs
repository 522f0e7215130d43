use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateProfileCommand;
use crate::authentication::models::Identity;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account from a field-validated command.
    ///
    /// # Arguments
    /// * `command` - Validated registration data including the plaintext password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `AgeRestriction` - Applicant is younger than the minimum age
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Retrieve account by unique username.
    ///
    /// # Errors
    /// * `NotFound` - No account with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_account(&self, username: &str) -> Result<Account, AccountError>;

    /// Retrieve every account, newest first.
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Update bio, photo and cellphone of the actor's own account.
    ///
    /// # Arguments
    /// * `actor` - Identity of the caller
    /// * `username` - Account to update
    /// * `command` - Fields to change; absent fields are kept
    ///
    /// # Errors
    /// * `Forbidden` - Actor is not the account owner
    /// * `NotFound` - No account with this username
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        actor: &Identity,
        username: &str,
        command: UpdateProfileCommand,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username unique constraint violated
    /// * `DuplicateEmail` - Email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by exact username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by exact email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts, newest first.
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Write back the mutable profile fields of an account, keyed by id.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;
}
