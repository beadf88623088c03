use std::time::Duration;

use super::errors::TokenError;
use super::payload::Payload;

/// Issues and verifies access tokens carrying a [`Payload`].
pub trait TokenMaker: Send + Sync {
    /// Mint a signed token for `username` valid for `duration`.
    ///
    /// # Returns
    /// The encoded token and the payload it carries
    ///
    /// # Errors
    /// * `InvalidDuration` - Duration is zero
    /// * `IdGeneration` - Token id could not be generated
    /// * `EncodingFailed` - Signing failed
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError>;

    /// Verify a token's signature and expiration.
    ///
    /// # Errors
    /// * `Invalid` - Token is malformed or its signature does not verify
    /// * `Expired` - Token is past its expiration
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
