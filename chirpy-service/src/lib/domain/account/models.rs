use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordError;

/// Account aggregate entity.
///
/// The password hash never leaves the domain; HTTP responses are built from
/// the public fields only.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_chirpy_red: bool,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    ///
    /// # Returns
    /// AccountId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by a client.
///
/// Only emptiness is rejected; strength policy is out of scope.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new account
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateAccountCommand {
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Command to replace an account's email and password.
///
/// Both fields are required; the password is re-hashed by the service.
#[derive(Debug)]
pub struct UpdateCredentialsCommand {
    pub email: EmailAddress,
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_round_trips_through_string() {
        let id = AccountId::new();
        assert_eq!(AccountId::from_string(&id.to_string()), Ok(id));
    }

    #[test]
    fn test_account_id_rejects_garbage() {
        assert!(matches!(
            AccountId::from_string("not-a-uuid"),
            Err(AccountIdError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("walt@breakingbad.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_password_must_not_be_empty() {
        assert_eq!(Password::new(String::new()), Err(PasswordError::Empty));
        assert!(Password::new("04234".to_string()).is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter2".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter2"));
    }
}
