use std::time::Duration;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;

/// Claims carried by an issued access token.
///
/// Created once at issuance and never mutated afterwards. Registered claims
/// that this service does not populate by default (`iss`, `sub`, `aud`, `nbf`)
/// are optional and omitted from the serialized form when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    /// Issuer
    #[serde(rename = "iss", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Unique token identifier
    pub id: Uuid,

    /// Authenticated principal
    pub username: String,

    pub issued_at: DateTime<Utc>,

    pub expired_at: DateTime<Utc>,

    /// Subject
    #[serde(rename = "sub", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Audience
    #[serde(rename = "aud", skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Not before
    #[serde(rename = "nbf", skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,
}

impl Payload {
    /// Create a payload for `username` that stays valid for `duration`.
    ///
    /// # Arguments
    /// * `username` - Authenticated principal
    /// * `duration` - Token lifetime, must be non-zero
    ///
    /// # Returns
    /// Payload with a fresh random id, `issued_at = now` and
    /// `expired_at = now + duration`
    ///
    /// # Errors
    /// * `InvalidDuration` - Duration is zero or does not fit a timestamp
    /// * `IdGeneration` - The OS entropy source failed
    pub fn new(username: impl Into<String>, duration: Duration) -> Result<Self, TokenError> {
        if duration.is_zero() {
            return Err(TokenError::InvalidDuration);
        }
        let lifetime = TimeDelta::from_std(duration).map_err(|_| TokenError::InvalidDuration)?;

        let id = random_token_id()?;
        let issued_at = Utc::now();
        let expired_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or(TokenError::InvalidDuration)?;

        Ok(Self {
            issuer: None,
            id,
            username: username.into(),
            issued_at,
            expired_at,
            subject: None,
            audience: None,
            not_before: None,
        })
    }

    /// Set issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Set not-before.
    pub fn with_not_before(mut self, not_before: DateTime<Utc>) -> Self {
        self.not_before = Some(not_before);
        self
    }

    /// Check the payload against the current wall clock.
    ///
    /// # Errors
    /// * `Expired` - The current time is past `expired_at`
    pub fn valid(&self) -> Result<(), TokenError> {
        self.valid_at(Utc::now())
    }

    /// Check the payload against an explicit instant.
    ///
    /// The payload is valid up to and including `expired_at`.
    pub fn valid_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if now > self.expired_at {
            return Err(TokenError::Expired);
        }
        Ok(())
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn audience(&self) -> Option<&str> {
        self.audience.as_deref()
    }

    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.not_before
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expiration(&self) -> DateTime<Utc> {
        self.expired_at
    }
}

fn random_token_id() -> Result<Uuid, TokenError> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::IdGeneration(e.to_string()))?;
    Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
