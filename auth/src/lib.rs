//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the account service:
//! - Password hashing (Argon2id) behind the [`PasswordHasher`] trait
//! - Access token payloads with expiration checks
//! - Token minting and verification (JWT, HS256) behind the [`TokenMaker`] trait
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{Argon2Hasher, PasswordHasher};
//!
//! let hasher = Argon2Hasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use std::time::Duration;
//!
//! use auth::{JwtMaker, TokenMaker};
//!
//! let maker = JwtMaker::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let (token, payload) = maker.create_token("alice", Duration::from_secs(900)).unwrap();
//! let verified = maker.verify_token(&token).unwrap();
//! assert_eq!(verified.id, payload.id);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::Argon2Hasher;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::JwtMaker;
pub use token::Payload;
pub use token::TokenError;
pub use token::TokenMaker;
