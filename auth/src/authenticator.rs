use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and access
/// token issuance.
///
/// Holds the process-wide signing secret (via its [`JwtHandler`]) and the
/// access token lifetime, so callers never pass either around per request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `issuer` - Issuer stamped into and required from access tokens
    /// * `access_token_ttl` - Lifetime of issued access tokens
    pub fn new(jwt_secret: &[u8], issuer: &str, access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, issuer),
            access_token_ttl,
        }
    }

    /// Replace the clock used for token timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.jwt_handler = self.jwt_handler.with_clock(clock);
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Account identifier the token speaks for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be used
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.generate_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the caller has already been
    /// authenticated by a stored refresh token.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.access_token_ttl)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, badly signed or expired
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.verify(token)
    }
}
