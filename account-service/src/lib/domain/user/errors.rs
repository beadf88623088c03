use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("must contain from {min}-{max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("must contain only lowercase letters, digits, or underscore")]
    InvalidCharacters,
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("must contain from {min}-{max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("must contain only letters or spaces")]
    InvalidCharacters,
}

/// Error for Password strength failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("must contain from {min}-{max} characters")]
    InvalidLength { min: usize, max: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("must contain from {min}-{max} characters")]
    InvalidLength { min: usize, max: usize },

    #[error("is not a valid email address")]
    InvalidFormat,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub description: String,
}

impl FieldViolation {
    pub fn new(field: &str, error: impl fmt::Display) -> Self {
        Self {
            field: field.to_string(),
            description: error.to_string(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.description)
    }
}

/// Ordered list of every violation found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: &str, error: impl fmt::Display) {
        self.0.push(FieldViolation::new(field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<FieldViolation> {
        self.0
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            violation.fmt(f)?;
        }
        Ok(())
    }
}

/// Store failures, classified by the adapter that produced them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint was violated; carries the conflicting key.
    #[error("{0} already exists")]
    Conflict(String),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store failure: {0}")]
    Other(String),
}

/// Error for task distribution operations
#[derive(Debug, Clone, Error)]
pub enum TaskDistributorError {
    #[error("Failed to serialize task: {0}")]
    SerializationFailed(String),

    #[error("Failed to enqueue task: {0}")]
    EnqueueFailed(String),

    #[error("Task enqueue timeout: {0}")]
    Timeout(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("invalid argument: {0}")]
    Validation(FieldViolations),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("user not found: {0}")]
    NotFound(String),

    #[error("incorrect password")]
    InvalidCredentials,

    #[error("request cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FieldViolations> for UserError {
    fn from(violations: FieldViolations) -> Self {
        UserError::Validation(violations)
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(key) => UserError::Conflict(key),
            StoreError::NotFound(key) => UserError::NotFound(key),
            StoreError::Other(msg) => UserError::Internal(msg),
        }
    }
}
