use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Clock;

use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;
use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::Session;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::session::store::RefreshTokenStore;

/// Session manager.
///
/// Login verifies credentials and issues an access/refresh pair, refresh
/// trades a stored refresh token for a new access token, revoke invalidates
/// one refresh token. Sessions are independent: a new login or a revoke
/// never touches other refresh tokens of the same account.
pub struct SessionService<AR, RR>
where
    AR: AccountRepository,
    RR: RefreshTokenRepository,
{
    accounts: Arc<AR>,
    refresh_tokens: RefreshTokenStore<RR>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
}

impl<AR, RR> SessionService<AR, RR>
where
    AR: AccountRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `refresh_tokens` - Refresh token store
    /// * `authenticator` - Password verification and access token issuance
    /// * `clock` - Source of the instant refresh tokens are checked against
    pub fn new(
        accounts: Arc<AR>,
        refresh_tokens: RefreshTokenStore<RR>,
        authenticator: Arc<Authenticator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens,
            authenticator,
            clock,
        }
    }
}

#[async_trait]
impl<AR, RR> SessionServicePort for SessionService<AR, RR>
where
    AR: AccountRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let email = EmailAddress::new(command.email).map_err(|_| SessionError::AccountNotFound)?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(SessionError::AccountNotFound)?;

        let access_token = self
            .authenticator
            .authenticate(
                &command.password,
                &account.password_hash,
                &account.id.to_string(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => SessionError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => SessionError::Internal(err.to_string()),
                AuthenticationError::JwtError(err) => SessionError::from(err),
            })?
            .access_token;

        // Nothing is handed out unless the refresh token is persisted.
        let refresh_token = self.refresh_tokens.issue(account.id).await?;

        tracing::info!(account_id = %account.id, "Session opened");

        Ok(Session {
            account,
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, authorization: Option<&str>) -> Result<String, SessionError> {
        let token = auth::extract_bearer(authorization)?;

        let record = self.refresh_tokens.lookup(token).await.map_err(|e| match e {
            SessionError::RefreshTokenNotFound => SessionError::InvalidRefreshToken,
            other => other,
        })?;

        if record.is_expired(self.clock.now()) {
            return Err(SessionError::RefreshTokenExpired);
        }

        if record.is_revoked() {
            return Err(SessionError::RefreshTokenRevoked);
        }

        let access_token = self
            .authenticator
            .generate_token(&record.account_id.to_string())?;

        tracing::debug!(account_id = %record.account_id, "Access token refreshed");

        Ok(access_token)
    }

    async fn revoke_session(&self, authorization: Option<&str>) -> Result<(), SessionError> {
        let token = auth::extract_bearer(authorization)?;

        match self.refresh_tokens.revoke(token).await {
            Ok(()) | Err(SessionError::RefreshTokenNotFound) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn authenticate(&self, authorization: Option<&str>) -> Result<AccountId, SessionError> {
        let token = auth::extract_bearer(authorization)?;
        let subject = self.authenticator.validate_token(token)?;

        AccountId::from_string(&subject).map_err(|e| SessionError::Malformed(e.to_string()))
    }
}
