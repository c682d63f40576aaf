use std::sync::Arc;

use auth::Clock;
use chrono::Duration;

use crate::account::models::AccountId;
use crate::session::errors::SessionError;
use crate::session::models::RefreshToken;
use crate::session::ports::RefreshTokenRepository;

/// Refresh token store.
///
/// Mints opaque token values, stamps their validity window and delegates
/// persistence to the repository.
pub struct RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    repository: Arc<RR>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<RR> RefreshTokenStore<RR>
where
    RR: RefreshTokenRepository,
{
    /// # Arguments
    /// * `repository` - Refresh token persistence implementation
    /// * `clock` - Source of issue and revocation timestamps
    /// * `ttl` - Lifetime of issued refresh tokens
    pub fn new(repository: Arc<RR>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            repository,
            clock,
            ttl,
        }
    }

    /// Issue and persist a fresh token for `account_id`.
    ///
    /// # Errors
    /// * `StoreFailure` - Insert failed
    pub async fn issue(&self, account_id: AccountId) -> Result<RefreshToken, SessionError> {
        let now = self.clock.now();

        let token = RefreshToken {
            token: auth::generate_refresh_token(),
            account_id,
            created_at: now,
            updated_at: now,
            expires_at: now + self.ttl,
            revoked_at: None,
        };

        self.repository.create(token).await
    }

    /// Look up a token by value.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No record with this value
    /// * `StoreFailure` - Query failed
    pub async fn lookup(&self, token: &str) -> Result<RefreshToken, SessionError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or(SessionError::RefreshTokenNotFound)
    }

    /// Revoke a token. Revoking twice keeps the first timestamp.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - No record with this value
    /// * `StoreFailure` - Update failed
    pub async fn revoke(&self, token: &str) -> Result<(), SessionError> {
        if self.repository.revoke(token, self.clock.now()).await? {
            Ok(())
        } else {
            Err(SessionError::RefreshTokenNotFound)
        }
    }
}
