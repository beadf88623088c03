use std::time::Duration;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::errors::TokenError;
use super::maker::TokenMaker;
use super::payload::Payload;

const MIN_SECRET_SIZE: usize = 32;

/// JWT token maker.
///
/// Signs payloads with HS256 (HMAC with SHA-256). Expiration is checked by
/// [`Payload::valid`] after the signature is verified, since the payload
/// carries `expired_at` rather than the numeric `exp` claim.
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtMaker {
    /// Create a new JWT maker with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens, at least 32 bytes
    ///
    /// # Errors
    /// * `InvalidKeySize` - Secret is shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_SIZE {
            return Err(TokenError::InvalidKeySize {
                min: MIN_SECRET_SIZE,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        // Registered time claims are not used; Payload::valid checks expiration
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(
        &self,
        username: &str,
        duration: Duration,
    ) -> Result<(String, Payload), TokenError> {
        let payload = Payload::new(username, duration)?;
        let header = Header::new(self.algorithm);

        let token = encode(&header, &payload, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok((token, payload))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let token_data = decode::<Payload>(token, &self.decoding_key, &self.validation())
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        token_data.claims.valid()?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_create_and_verify_token() {
        let maker = JwtMaker::new(SECRET).expect("Failed to create maker");
        let duration = Duration::from_secs(60);

        let (token, payload) = maker
            .create_token("alice", duration)
            .expect("Failed to create token");
        assert!(!token.is_empty());

        let verified = maker.verify_token(&token).expect("Failed to verify token");
        assert_eq!(verified.id, payload.id);
        assert_eq!(verified.username, "alice");
        assert_eq!(verified.issued_at, payload.issued_at);
        assert_eq!(verified.expired_at, payload.expired_at);
    }

    #[test]
    fn test_expired_token() {
        let maker = JwtMaker::new(SECRET).unwrap();

        let mut payload = Payload::new("alice", Duration::from_secs(60)).unwrap();
        payload.issued_at = Utc::now() - TimeDelta::minutes(2);
        payload.expired_at = Utc::now() - TimeDelta::minutes(1);
        let token = encode(&Header::new(maker.algorithm), &payload, &maker.encoding_key).unwrap();

        assert_eq!(maker.verify_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_malformed_token() {
        let maker = JwtMaker::new(SECRET).unwrap();

        let result = maker.verify_token("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let maker1 = JwtMaker::new(b"secret1_at_least_32_bytes_long_key!").unwrap();
        let maker2 = JwtMaker::new(b"secret2_at_least_32_bytes_long_key!").unwrap();

        let (token, _) = maker1
            .create_token("alice", Duration::from_secs(60))
            .unwrap();

        let result = maker2.verify_token(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_token_with_optional_claims() {
        let maker = JwtMaker::new(SECRET).unwrap();

        let payload = Payload::new("alice", Duration::from_secs(60))
            .unwrap()
            .with_issuer("account-service")
            .with_audience("web")
            .with_not_before(Utc::now());
        let token = encode(&Header::new(maker.algorithm), &payload, &maker.encoding_key).unwrap();

        let verified = maker.verify_token(&token).expect("Failed to verify token");
        assert_eq!(verified, payload);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtMaker::new(b"too_short");
        assert!(matches!(
            result,
            Err(TokenError::InvalidKeySize { min: 32, actual: 9 })
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let maker = JwtMaker::new(SECRET).unwrap();
        let result = maker.create_token("alice", Duration::ZERO);
        assert!(matches!(result, Err(TokenError::InvalidDuration)));
    }
}
