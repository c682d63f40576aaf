use auth::CredentialError;
use auth::JwtError;
use thiserror::Error;

use crate::account::errors::AccountError;

/// Error for session lifecycle operations.
///
/// Every failure kind is its own variant so callers can tell them apart;
/// the HTTP layer decides which of them look the same to clients.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    // Credential presentation
    #[error("Missing credential: {0}")]
    MissingCredential(#[from] CredentialError),

    // Access tokens
    #[error("Access token is malformed: {0}")]
    Malformed(String),

    #[error("Access token signature is invalid")]
    InvalidSignature,

    #[error("Access token is expired")]
    Expired,

    // Login
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No account with this email")]
    AccountNotFound,

    // Refresh tokens
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh token revoked")]
    RefreshTokenRevoked,

    // Infrastructure errors
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Credential check failed: {0}")]
    Internal(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Malformed(reason) => SessionError::Malformed(reason),
            JwtError::InvalidSignature => SessionError::InvalidSignature,
            JwtError::Expired => SessionError::Expired,
            JwtError::MissingSigningKey | JwtError::EncodingFailed(_) => {
                SessionError::TokenIssuance(err.to_string())
            }
        }
    }
}

impl From<AccountError> for SessionError {
    fn from(err: AccountError) -> Self {
        SessionError::StoreFailure(err.to_string())
    }
}
