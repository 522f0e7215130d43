use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field name as it appears in the request payload
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Top-level error for account and authentication operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Input errors
    #[error("Invalid input: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    // Business rules
    #[error("You must be at least {minimum_age} years old to register.")]
    AgeRestriction { minimum_age: u32 },

    #[error("This username is already taken.")]
    DuplicateUsername(String),

    #[error("This email is already registered.")]
    DuplicateEmail(String),

    #[error("User not found")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not allowed to modify account {0}")]
    Forbidden(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<FieldError> for AccountError {
    fn from(err: FieldError) -> Self {
        AccountError::Validation(vec![err])
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
