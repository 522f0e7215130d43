use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Password hashing and session tokens behind one handle.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

impl Authenticator {
    /// Create a new authenticator with default hashing parameters.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(jwt_secret, token_ttl, PasswordHasher::new())
    }

    /// Create a new authenticator with a preconfigured password hasher.
    pub fn with_hasher(jwt_secret: &[u8], token_ttl: Duration, hasher: PasswordHasher) -> Self {
        Self {
            password_hasher: hasher,
            token_codec: TokenCodec::new(jwt_secret, token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Compare a plaintext password with a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token for a subject whose identity is already established.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn generate_token(&self, subject: &str) -> Result<String, JwtError> {
        self.token_codec.issue(subject)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed verification
    /// * `TokenExpired` - Token lifetime is over
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.token_codec.verify(token)
    }

    /// Underlying token codec.
    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }
}
