use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Access token codec.
///
/// Issues and verifies HS256-signed tokens bound to a single issuer.
/// Expiry is checked against the injected clock, not the library's own
/// view of the system time.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    has_secret: bool,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `issuer` - Issuer written into and required from every token
    ///
    /// # Returns
    /// JwtHandler configured with HS256 and the system clock
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
            has_secret: !secret.is_empty(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for issued-at and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a signed token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Handler was built with an empty secret
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::new(&self.issuer, subject, self.clock.now(), ttl);
        self.encode(&claims)
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `MissingSigningKey` - Handler was built with an empty secret
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        if !self.has_secret {
            return Err(JwtError::MissingSigningKey);
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with this handler's secret
    /// * `Malformed` - Token cannot be parsed, lacks a required claim, or has a foreign issuer
    /// * `Expired` - Clock is at or past the token's expiration
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        self.decode(token).map(|claims| claims.sub)
    }

    /// Decode and fully validate a token.
    ///
    /// # Errors
    /// Same as [`JwtHandler::verify`]
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.set_issuer(&[&self.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        if token_data.claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}
