use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::errors::FieldError;

pub mod get_account;
pub mod list_accounts;
pub mod login;
pub mod register;
pub mod update_profile;

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    InvalidInput(Vec<FieldError>),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, Vec::new())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::InvalidInput(errors) => (
                StatusCode::BAD_REQUEST,
                "Invalid input".to_string(),
                errors.into_iter().map(FieldErrorData::from).collect(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, Vec::new()),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Validation(errors) => ApiError::InvalidInput(errors),
            AccountError::AgeRestriction { .. }
            | AccountError::DuplicateUsername(_)
            | AccountError::DuplicateEmail(_) => ApiError::BadRequest(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed unexpectedly");
                ApiError::InternalServerError(UNEXPECTED_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::InvalidInput(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(
        status_code: StatusCode,
        message: String,
        errors: Vec<FieldErrorData>,
    ) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrorData {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorData {
    fn from(err: FieldError) -> Self {
        Self {
            field: err.field.to_string(),
            message: err.message,
        }
    }
}
