use chrono::DateTime;
use chrono::Utc;

use crate::account::models::Account;
use crate::account::models::AccountId;

/// Persisted refresh token record.
///
/// Created at login and mutated at most once, when `revoked_at` is set.
/// Records are kept after expiry or revocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Valid strictly before `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}

/// Login attempt as received from a client.
///
/// Kept unvalidated: a malformed email must fail exactly like an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub access_token: String,
    pub refresh_token: RefreshToken,
}
