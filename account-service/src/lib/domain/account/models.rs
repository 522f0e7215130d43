use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::FieldError;

/// Account aggregate entity.
///
/// Represents a registered user. Only the profile fields (bio, photo,
/// cellphone) change after registration.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub full_name: FullName,
    pub cellphone: PhoneNumber,
    pub email: EmailAddress,
    pub birth_date: NaiveDate,
    pub password_hash: String,
    pub bio: Option<Bio>,
    pub photo: Option<PhotoUrl>,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Username value type
///
/// Ensures username is 4-50 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub const FIELD: &'static str = "username";
    const MIN_LENGTH: usize = 4;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `FieldError` - Username is blank or outside 4-50 characters
    pub fn new(username: String) -> Result<Self, FieldError> {
        if is_blank(&username) {
            return Err(FieldError::new(Self::FIELD, "Username is required"));
        }

        let length = char_len(&username);
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(FieldError::new(
                Self::FIELD,
                format!(
                    "Username must be between {} and {} characters",
                    Self::MIN_LENGTH,
                    Self::MAX_LENGTH
                ),
            ));
        }

        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full name value type (5-100 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub const FIELD: &'static str = "fullname";
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 100;

    pub fn new(full_name: String) -> Result<Self, FieldError> {
        if is_blank(&full_name) {
            return Err(FieldError::new(Self::FIELD, "Full name is required"));
        }

        let length = char_len(&full_name);
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(FieldError::new(
                Self::FIELD,
                format!(
                    "Full name must be between {} and {} characters",
                    Self::MIN_LENGTH,
                    Self::MAX_LENGTH
                ),
            ));
        }

        Ok(Self(full_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Phone number value type, exactly ten ASCII digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const FIELD: &'static str = "cellphone";
    const DIGITS: usize = 10;

    pub fn new(number: String) -> Result<Self, FieldError> {
        if is_blank(&number) {
            return Err(FieldError::new(Self::FIELD, "Phone number is required"));
        }

        if number.len() != Self::DIGITS || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::new(
                Self::FIELD,
                "Phone number must be exactly 10 digits",
            ));
        }

        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub const FIELD: &'static str = "email";

    pub fn new(email: String) -> Result<Self, FieldError> {
        if is_blank(&email) {
            return Err(FieldError::new(Self::FIELD, "Email is required"));
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|_| FieldError::new(Self::FIELD, "Invalid email format"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Birth date, strictly before the day it was validated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub const FIELD: &'static str = "birthDate";

    /// # Errors
    /// * `FieldError` - Date is today or later
    pub fn new(date: NaiveDate, today: NaiveDate) -> Result<Self, FieldError> {
        if date >= today {
            return Err(FieldError::new(
                Self::FIELD,
                "Birth date must be in the past",
            ));
        }

        Ok(Self(date))
    }

    /// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub fn parse(raw: &str, today: NaiveDate) -> Result<Self, FieldError> {
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            FieldError::new(Self::FIELD, "Birth date must be a valid date (YYYY-MM-DD)")
        })?;

        Self::new(date, today)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Completed years of age on `today`.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_between(self.0, today)
    }
}

/// Whole calendar years from `birth` to `today`.
///
/// Someone born on Feb 29 turns a year older on Mar 1 in non-leap years.
pub fn age_between(birth: NaiveDate, today: NaiveDate) -> u32 {
    if today <= birth {
        return 0;
    }

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    years.max(0) as u32
}

/// Plaintext password accepted at registration.
///
/// 8-12 characters with at least one lowercase letter, one uppercase letter,
/// one digit and one of `%$;&.,#`. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 12;
    const SPECIAL_CHARACTERS: &'static str = "%$;&.,#";

    pub fn new(password: String) -> Result<Self, FieldError> {
        if is_blank(&password) {
            return Err(FieldError::new(Self::FIELD, "Password is required"));
        }

        let length = char_len(&password);
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(FieldError::new(
                Self::FIELD,
                format!(
                    "Password must be between {} and {} characters",
                    Self::MIN_LENGTH,
                    Self::MAX_LENGTH
                ),
            ));
        }

        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_special = password
            .chars()
            .any(|c| Self::SPECIAL_CHARACTERS.contains(c));

        if !(has_lower && has_upper && has_digit && has_special) {
            return Err(FieldError::new(
                Self::FIELD,
                format!(
                    "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character ({})",
                    Self::SPECIAL_CHARACTERS
                ),
            ));
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

/// Free-text biography, at most 255 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bio(String);

impl Bio {
    pub const FIELD: &'static str = "bio";
    const MAX_LENGTH: usize = 255;

    pub fn new(bio: String) -> Result<Self, FieldError> {
        if char_len(&bio) > Self::MAX_LENGTH {
            return Err(FieldError::new(
                Self::FIELD,
                format!("Bio must not exceed {} characters", Self::MAX_LENGTH),
            ));
        }

        Ok(Self(bio))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Profile photo location (http, https or ftp URL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    pub const FIELD: &'static str = "photo";
    const SCHEMES: [&'static str; 3] = ["http://", "https://", "ftp://"];

    pub fn new(url: String) -> Result<Self, FieldError> {
        if !Self::SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
            return Err(FieldError::new(Self::FIELD, "Photo must be a valid URL"));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new account with validated fields
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
    pub username: Username,
    pub full_name: FullName,
    pub cellphone: PhoneNumber,
    pub email: EmailAddress,
    pub birth_date: BirthDate,
    pub password: Password,
    pub bio: Option<Bio>,
    pub photo: Option<PhotoUrl>,
}

/// Command to update the mutable profile fields.
///
/// Only provided fields are changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub bio: Option<Bio>,
    pub photo: Option<PhotoUrl>,
    pub cellphone: Option<PhoneNumber>,
}

/// Credentials submitted to log in
#[derive(Clone)]
pub struct LoginCommand {
    pub username_or_email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username_or_email", &self.username_or_email)
            .finish_non_exhaustive()
    }
}
