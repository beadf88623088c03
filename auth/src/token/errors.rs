use thiserror::Error;

/// Error type for token issuance and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(String),

    #[error("token duration must be positive")]
    InvalidDuration,

    #[error("invalid key size: must be at least {min} bytes, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("failed to generate token id: {0}")]
    IdGeneration(String),

    #[error("failed to encode token: {0}")]
    EncodingFailed(String),
}
