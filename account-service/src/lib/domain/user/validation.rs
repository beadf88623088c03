//! Field-level syntax checks for user input.
//!
//! Each check is a pure function on a single field. The `validate` methods on
//! the command types run every applicable check and report all violations at
//! once, in field order.

use std::str::FromStr;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::models::ValidRegistration;
use crate::domain::user::models::ValidUpdate;
use crate::user::errors::EmailError;
use crate::user::errors::FieldViolations;
use crate::user::errors::FullNameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 100;
pub const FULL_NAME_MIN_LENGTH: usize = 3;
pub const FULL_NAME_MAX_LENGTH: usize = 100;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 100;
pub const EMAIL_MIN_LENGTH: usize = 3;
pub const EMAIL_MAX_LENGTH: usize = 200;

fn has_length(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    (min..=max).contains(&length)
}

pub fn validate_username(value: &str) -> Result<(), UsernameError> {
    if !has_length(value, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH) {
        return Err(UsernameError::InvalidLength {
            min: USERNAME_MIN_LENGTH,
            max: USERNAME_MAX_LENGTH,
        });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(UsernameError::InvalidCharacters);
    }
    Ok(())
}

pub fn validate_full_name(value: &str) -> Result<(), FullNameError> {
    if !has_length(value, FULL_NAME_MIN_LENGTH, FULL_NAME_MAX_LENGTH) {
        return Err(FullNameError::InvalidLength {
            min: FULL_NAME_MIN_LENGTH,
            max: FULL_NAME_MAX_LENGTH,
        });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
    {
        return Err(FullNameError::InvalidCharacters);
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), PasswordPolicyError> {
    if !has_length(value, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH) {
        return Err(PasswordPolicyError::InvalidLength {
            min: PASSWORD_MIN_LENGTH,
            max: PASSWORD_MAX_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), EmailError> {
    if !has_length(value, EMAIL_MIN_LENGTH, EMAIL_MAX_LENGTH) {
        return Err(EmailError::InvalidLength {
            min: EMAIL_MIN_LENGTH,
            max: EMAIL_MAX_LENGTH,
        });
    }
    email_address::EmailAddress::from_str(value)
        .map(|_| ())
        .map_err(|_| EmailError::InvalidFormat)
}

impl RegisterUserCommand {
    /// Validate every field, collecting all violations.
    ///
    /// # Returns
    /// The validated registration, or every violation in field order
    /// (`username`, `full_name`, `password`, `email`)
    pub fn validate(self) -> Result<ValidRegistration, FieldViolations> {
        let mut violations = FieldViolations::new();

        let username = Username::new(self.username)
            .map_err(|e| violations.push("username", e))
            .ok();
        let full_name = FullName::new(self.full_name)
            .map_err(|e| violations.push("full_name", e))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| violations.push("password", e))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| violations.push("email", e))
            .ok();

        match (username, full_name, password, email) {
            (Some(username), Some(full_name), Some(password), Some(email)) => {
                Ok(ValidRegistration {
                    username,
                    full_name,
                    email,
                    password,
                })
            }
            _ => Err(violations),
        }
    }
}

impl UpdateUserCommand {
    /// Validate the target username and every present field.
    pub fn validate(self) -> Result<ValidUpdate, FieldViolations> {
        let mut violations = FieldViolations::new();

        let username = Username::new(self.username)
            .map_err(|e| violations.push("username", e))
            .ok();
        let full_name = self
            .full_name
            .map(FullName::new)
            .transpose()
            .map_err(|e| violations.push("full_name", e));
        let password = self
            .password
            .map(Password::new)
            .transpose()
            .map_err(|e| violations.push("password", e));
        let email = self
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(|e| violations.push("email", e));

        match (username, full_name, password, email) {
            (Some(username), Ok(full_name), Ok(password), Ok(email)) => Ok(ValidUpdate {
                username,
                full_name,
                email,
                password,
            }),
            _ => Err(violations),
        }
    }
}

impl LoginUserCommand {
    /// Validate the credentials' syntax before touching the store.
    pub fn validate(self) -> Result<(Username, Password), FieldViolations> {
        let mut violations = FieldViolations::new();

        let username = Username::new(self.username)
            .map_err(|e| violations.push("username", e))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| violations.push("password", e))
            .ok();

        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(violations),
        }
    }
}
