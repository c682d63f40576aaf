use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is empty")]
    Empty,
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
