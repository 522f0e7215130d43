use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// Carries the RFC 7519 registered claims used for session tokens: the
/// subject, when it was issued and when it stops being accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username the token was issued to)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject, issued now and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is bound to
    /// * `ttl` - Lifetime of the token, zero yields an already expired token
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    pub fn issued_for(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.to_string()),
            iat: Some(now.timestamp()),
            exp: Some((now + ttl).timestamp()),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at the instant of its `exp` claim.
    /// Claims without `exp` never expire here; the codec rejects them earlier.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp >= exp)
    }
}
