use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::validation::RegistrationForm;
use crate::inbound::http::router::AppState;

/// Register an account and answer with a session token for it.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = payload?;
    let command = body.into_form().validate(Utc::now().date_naive())?;
    let password = command.password.clone();

    let account = state.account_service.register(command).await?;

    let identity = state
        .auth_service
        .authenticate(account.email.as_str(), password.as_str())
        .await?;
    let token = state.auth_service.issue_token(&identity)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData {
            message: "User successfully registered".to_string(),
            username: account.username.as_str().to_string(),
            token,
        },
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    username: Option<String>,
    fullname: Option<String>,
    cellphone: Option<String>,
    email: Option<String>,
    birth_date: Option<String>,
    password: Option<String>,
    bio: Option<String>,
    photo: Option<String>,
}

impl RegisterRequest {
    fn into_form(self) -> RegistrationForm {
        RegistrationForm {
            username: self.username,
            full_name: self.fullname,
            cellphone: self.cellphone,
            email: self.email,
            birth_date: self.birth_date,
            password: self.password,
            bio: self.bio,
            photo: self.photo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub username: String,
    pub token: String,
}
