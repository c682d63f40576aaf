use thiserror::Error;

const BEARER_SCHEME: &str = "Bearer";
const API_KEY_SCHEME: &str = "ApiKey";

/// Error type for credential extraction from an `Authorization` header.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Authorization header missing")]
    Missing,

    #[error("Invalid Authorization format. Expected: {0} <credential>")]
    InvalidFormat(&'static str),
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// # Arguments
/// * `header` - Raw header value, if the header was present
///
/// # Errors
/// * `Missing` - No header
/// * `InvalidFormat` - Wrong scheme or empty token
pub fn extract_bearer(header: Option<&str>) -> Result<&str, CredentialError> {
    extract_scheme(header, BEARER_SCHEME)
}

/// Extract the key from an `Authorization: ApiKey <key>` header value.
///
/// # Errors
/// * `Missing` - No header
/// * `InvalidFormat` - Wrong scheme or empty key
pub fn extract_api_key(header: Option<&str>) -> Result<&str, CredentialError> {
    extract_scheme(header, API_KEY_SCHEME)
}

fn extract_scheme<'a>(
    header: Option<&'a str>,
    scheme: &'static str,
) -> Result<&'a str, CredentialError> {
    let header = header.ok_or(CredentialError::Missing)?;

    let credential = header
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix(' '))
        .map(str::trim)
        .ok_or(CredentialError::InvalidFormat(scheme))?;

    if credential.is_empty() {
        return Err(CredentialError::InvalidFormat(scheme));
    }

    Ok(credential)
}
