use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::validation;
use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// User account as persisted by the store.
///
/// Carries the password hash, so it never leaves the domain service;
/// callers receive a [`UserView`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
    /// `None` until the password is changed after registration.
    pub password_changed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Sanitized projection of a user returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            password_changed_at: user.password_changed_at,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            password_changed_at: user.password_changed_at,
            created_at: user.created_at,
        }
    }
}

/// Username value type
///
/// 3-100 characters; lowercase ASCII letters, digits and underscore only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new valid username.
    ///
    /// # Errors
    /// * `InvalidLength` - Outside 3-100 characters
    /// * `InvalidCharacters` - Contains anything but `[a-z0-9_]`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        validation::validate_username(&username)?;
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name value type
///
/// 3-100 characters; ASCII letters and whitespace only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(full_name: String) -> Result<Self, FullNameError> {
        validation::validate_full_name(&full_name)?;
        Ok(Self(full_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Email address type
///
/// At most 200 characters and parseable as an RFC 5322 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, EmailError> {
        validation::validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Plaintext password that passed the strength policy.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        validation::validate_password(&password)?;
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Raw registration request, validated by the service as a whole.
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Registration request whose fields all passed validation.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: Username,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Raw partial update. `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial update whose present fields all passed validation.
#[derive(Debug, Clone)]
pub struct ValidUpdate {
    pub username: Username,
    pub full_name: Option<FullName>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
}

/// Login credentials.
#[derive(Clone)]
pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUserCommand")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Store input for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserParams {
    pub username: String,
    pub hashed_password: String,
    pub full_name: String,
    pub email: String,
}

/// Store input for a partial update.
///
/// Each `Some` overwrites the stored column; each `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserParams {
    pub username: String,
    pub full_name: Option<String>,
    pub hashed_password: Option<String>,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub email: Option<String>,
}
