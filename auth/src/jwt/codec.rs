use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Session token codec.
///
/// Binds a subject to a signed token with a fixed lifetime and turns a
/// presented token back into the subject it was issued for.
pub struct TokenCodec {
    handler: JwtHandler,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret` and issuing tokens valid for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
        }
    }

    /// Issue a token for `subject`, expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.handler.encode(&Claims::issued_for(subject, self.ttl))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `MalformedToken` - Token does not have the shape of a JWT
    /// * `InvalidToken` - Token is blank, badly signed, or lacks `sub`/`exp`
    /// * `TokenExpired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        if token.trim().is_empty() {
            return Err(JwtError::InvalidToken("Token is empty".to_string()));
        }

        let claims: Claims = self.handler.decode(token)?;

        if claims.exp.is_none() {
            return Err(JwtError::InvalidToken("Missing exp claim".to_string()));
        }

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        claims
            .sub
            .ok_or_else(|| JwtError::InvalidToken("Missing sub claim".to_string()))
    }

    /// Check that `token` verifies and was issued for exactly `expected_subject`.
    ///
    /// Never fails: any verification error yields `false`.
    pub fn is_valid(&self, token: &str, expected_subject: &str) -> bool {
        self.verify(token)
            .map(|subject| subject == expected_subject)
            .unwrap_or(false)
    }
}
