use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::inbound::http::middleware::Authenticated;
use crate::inbound::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Authenticated(_identity): Authenticated,
    Path(username): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .get_account(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

/// Public view of an account. The password hash is never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub username: String,
    pub fullname: String,
    pub cellphone: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.as_str().to_string(),
            fullname: account.full_name.as_str().to_string(),
            cellphone: account.cellphone.as_str().to_string(),
            email: account.email.as_str().to_string(),
            birth_date: account.birth_date,
            bio: account.bio.as_ref().map(|bio| bio.as_str().to_string()),
            photo: account.photo.as_ref().map(|photo| photo.as_str().to_string()),
            created_at: account.created_at,
        }
    }
}
