use axum::extract::State;
use axum::http::StatusCode;

use super::get_account::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::Authenticated;
use crate::inbound::http::router::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
    Authenticated(_identity): Authenticated,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let accounts = state.account_service.list_accounts().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        accounts.iter().map(AccountData::from).collect(),
    ))
}
