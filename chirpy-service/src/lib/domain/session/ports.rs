use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::models::AccountId;
use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshToken;
use crate::session::models::Session;

/// Port for session lifecycle operations.
///
/// Methods taking `authorization` receive the raw `Authorization` header
/// value (if any) and extract the bearer credential themselves.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a new session.
    ///
    /// # Returns
    /// Account, access token and persisted refresh token
    ///
    /// # Errors
    /// * `AccountNotFound` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenIssuance` - Access token could not be signed
    /// * `StoreFailure` - Account lookup or refresh token persistence failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is neither rotated nor extended.
    ///
    /// # Errors
    /// * `MissingCredential` - No bearer credential
    /// * `InvalidRefreshToken` - Token is unknown
    /// * `RefreshTokenExpired` - Token is past its expiry
    /// * `RefreshTokenRevoked` - Token was revoked
    /// * `StoreFailure` - Lookup failed
    async fn refresh(&self, authorization: Option<&str>) -> Result<String, SessionError>;

    /// Revoke a refresh token. Unknown and already revoked tokens succeed.
    ///
    /// # Errors
    /// * `MissingCredential` - No bearer credential
    /// * `StoreFailure` - Update failed
    async fn revoke_session(&self, authorization: Option<&str>) -> Result<(), SessionError>;

    /// Resolve a bearer access token to the account it speaks for.
    ///
    /// # Errors
    /// * `MissingCredential` - No bearer credential
    /// * `Malformed` - Token cannot be parsed or its subject is not an account ID
    /// * `InvalidSignature` - Token was signed with another secret
    /// * `Expired` - Token is past its expiry
    async fn authenticate(&self, authorization: Option<&str>) -> Result<AccountId, SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new refresh token record.
    ///
    /// # Errors
    /// * `StoreFailure` - Insert failed
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;

    /// Exact-match lookup by token value.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `StoreFailure` - Query failed
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Set `revoked_at` unless already set.
    ///
    /// # Returns
    /// Whether a record with this token exists
    ///
    /// # Errors
    /// * `StoreFailure` - Update failed
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, SessionError>;
}
