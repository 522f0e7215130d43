//! Field-level validation of raw account input.
//!
//! Every check runs and all failures are returned together, so a client can
//! fix its whole form in one round trip.

use chrono::NaiveDate;

use crate::account::errors::FieldError;
use crate::account::models::Bio;
use crate::account::models::BirthDate;
use crate::account::models::EmailAddress;
use crate::account::models::FullName;
use crate::account::models::LoginCommand;
use crate::account::models::Password;
use crate::account::models::PhoneNumber;
use crate::account::models::PhotoUrl;
use crate::account::models::RegisterAccountCommand;
use crate::account::models::UpdateProfileCommand;
use crate::account::models::Username;

/// Unvalidated registration input
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub cellphone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
}

/// Unvalidated profile update input
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub cellphone: Option<String>,
}

/// Unvalidated login input
#[derive(Clone, Default)]
pub struct LoginForm {
    pub username_or_email: Option<String>,
    pub password: Option<String>,
}

/// Collects per-field outcomes without stopping at the first failure.
#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    fn required(&mut self, value: Option<String>, field: &'static str, message: &str) -> String {
        match value {
            Some(value) => value,
            None => {
                self.errors.push(FieldError::new(field, message));
                String::new()
            }
        }
    }
}

/// Blank optional input counts as not provided.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RegistrationForm {
    /// Validate every field and build a registration command.
    ///
    /// `today` anchors the birth date check.
    ///
    /// # Errors
    /// All field errors found, in field order.
    pub fn validate(self, today: NaiveDate) -> Result<RegisterAccountCommand, Vec<FieldError>> {
        let mut collector = Collector::default();

        let username = self.username.unwrap_or_default();
        let username = collector.check(Username::new(username));

        let full_name = self.full_name.unwrap_or_default();
        let full_name = collector.check(FullName::new(full_name));

        let cellphone = self.cellphone.unwrap_or_default();
        let cellphone = collector.check(PhoneNumber::new(cellphone));

        let email = self.email.unwrap_or_default();
        let email = collector.check(EmailAddress::new(email));

        let birth_date = match present(self.birth_date) {
            Some(raw) => collector.check(BirthDate::parse(&raw, today)),
            None => {
                collector
                    .errors
                    .push(FieldError::new(BirthDate::FIELD, "Birth date is required"));
                None
            }
        };

        let password = self.password.unwrap_or_default();
        let password = collector.check(Password::new(password));

        let bio = present(self.bio).and_then(|bio| collector.check(Bio::new(bio)));
        let photo = present(self.photo).and_then(|photo| collector.check(PhotoUrl::new(photo)));

        match (username, full_name, cellphone, email, birth_date, password) {
            (
                Some(username),
                Some(full_name),
                Some(cellphone),
                Some(email),
                Some(birth_date),
                Some(password),
            ) if collector.errors.is_empty() => Ok(RegisterAccountCommand {
                username,
                full_name,
                cellphone,
                email,
                birth_date,
                password,
                bio,
                photo,
            }),
            _ => Err(collector.errors),
        }
    }
}

impl ProfileForm {
    /// Validate the provided fields and build an update command.
    pub fn validate(self) -> Result<UpdateProfileCommand, Vec<FieldError>> {
        let mut collector = Collector::default();

        let command = UpdateProfileCommand {
            bio: present(self.bio).and_then(|bio| collector.check(Bio::new(bio))),
            photo: present(self.photo).and_then(|photo| collector.check(PhotoUrl::new(photo))),
            cellphone: present(self.cellphone)
                .and_then(|number| collector.check(PhoneNumber::new(number))),
        };

        if collector.errors.is_empty() {
            Ok(command)
        } else {
            Err(collector.errors)
        }
    }
}

impl LoginForm {
    pub fn validate(self) -> Result<LoginCommand, Vec<FieldError>> {
        let mut collector = Collector::default();

        let username_or_email = collector.required(
            present(self.username_or_email),
            "usernameOrEmail",
            "Username or Email is required",
        );
        let password = collector.required(
            present(self.password),
            Password::FIELD,
            "Password is required",
        );

        if collector.errors.is_empty() {
            Ok(LoginCommand {
                username_or_email,
                password,
            })
        } else {
            Err(collector.errors)
        }
    }
}
