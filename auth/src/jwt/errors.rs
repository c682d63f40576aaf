use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Error type for access token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing key is missing")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => JwtError::InvalidSignature,
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Malformed(err.to_string()),
        }
    }
}
