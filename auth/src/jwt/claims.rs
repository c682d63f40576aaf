use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// Carries the RFC 7519 registered claims the service relies on: who the
/// token speaks for, who minted it, and the window in which it is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, valid from `issued_at` for `ttl`.
    ///
    /// # Arguments
    /// * `issuer` - Issuer name
    /// * `subject` - Account identifier
    /// * `issued_at` - Instant the token is minted
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with iss, sub, iat and exp set
    pub fn new(
        issuer: impl ToString,
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is valid strictly before its expiration instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
