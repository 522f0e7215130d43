use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_account::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::validation::ProfileForm;
use crate::inbound::http::middleware::Authenticated;
use crate::inbound::http::router::AppState;

/// HTTP request body for a profile update (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub cellphone: Option<String>,
}

/// Ownership is checked before the body, so editing someone else's profile
/// is 403 whatever the payload holds.
pub async fn update_profile(
    State(state): State<AppState>,
    Authenticated(identity): Authenticated,
    Path(username): Path<String>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    if identity.subject() != username {
        return Err(AccountError::Forbidden(username).into());
    }

    let Json(body) = payload?;
    let command = ProfileForm {
        bio: body.bio,
        photo: body.photo,
        cellphone: body.cellphone,
    }
    .validate()?;

    state
        .account_service
        .update_profile(&identity, &username, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
