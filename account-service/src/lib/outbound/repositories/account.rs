use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AccountError;
use crate::account::errors::FieldError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Bio;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::PhoneNumber;
use crate::account::models::PhotoUrl;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, username, full_name, cellphone, email, birth_date, \
                               password_hash, bio, photo, created_at";

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &PgRow) -> Result<Account, AccountError> {
        let bio: Option<String> = row.try_get("bio").map_err(database_error)?;
        let photo: Option<String> = row.try_get("photo").map_err(database_error)?;

        Ok(Account {
            id: AccountId(row.try_get("id").map_err(database_error)?),
            username: stored(Username::new(
                row.try_get("username").map_err(database_error)?,
            ))?,
            full_name: stored(FullName::new(
                row.try_get("full_name").map_err(database_error)?,
            ))?,
            cellphone: stored(PhoneNumber::new(
                row.try_get("cellphone").map_err(database_error)?,
            ))?,
            email: stored(EmailAddress::new(
                row.try_get("email").map_err(database_error)?,
            ))?,
            birth_date: row.try_get("birth_date").map_err(database_error)?,
            password_hash: row.try_get("password_hash").map_err(database_error)?,
            bio: bio.map(Bio::new).transpose().map_err(corrupt_row)?,
            photo: photo.map(PhotoUrl::new).transpose().map_err(corrupt_row)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE {} = $1",
            ACCOUNT_COLUMNS, column
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}

fn database_error(e: sqlx::Error) -> AccountError {
    AccountError::DatabaseError(e.to_string())
}

fn corrupt_row(e: FieldError) -> AccountError {
    AccountError::DatabaseError(format!("Stored account is invalid: {}", e))
}

fn stored<T>(value: Result<T, FieldError>) -> Result<T, AccountError> {
    value.map_err(corrupt_row)
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, full_name, cellphone, email, birth_date,
                                  password_hash, bio, photo, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.full_name.as_str())
        .bind(account.cellphone.as_str())
        .bind(account.email.as_str())
        .bind(account.birth_date)
        .bind(&account.password_hash)
        .bind(account.bio.as_ref().map(|bio| bio.as_str()))
        .bind(account.photo.as_ref().map(|photo| photo.as_str()))
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("accounts_username_key") {
                        return AccountError::DuplicateUsername(
                            account.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("accounts_email_key") {
                        return AccountError::DuplicateEmail(account.email.as_str().to_string());
                    }
                }
            }
            database_error(e)
        })?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.find_one("email", email).await
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM accounts ORDER BY created_at DESC",
            ACCOUNT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_account).collect()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET cellphone = $2, bio = $3, photo = $4
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.cellphone.as_str())
        .bind(account.bio.as_ref().map(|bio| bio.as_str()))
        .bind(account.photo.as_ref().map(|photo| photo.as_str()))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }
}
