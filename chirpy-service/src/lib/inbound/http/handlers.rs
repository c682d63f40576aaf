use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::session::errors::SessionError;

pub mod admin;
pub mod create_account;
pub mod create_chirp;
pub mod delete_chirp;
pub mod get_chirp;
pub mod list_chirps;
pub mod login;
pub mod polka_webhook;
pub mod refresh;
pub mod revoke;
pub mod update_account;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const LOGIN_FAILED_MESSAGE: &str = "Incorrect email or password";

impl ApiError {
    /// Log the detail and hide it from the client.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::PasswordHashing(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingCredential(_) => ApiError::Unauthorized(err.to_string()),
            SessionError::Malformed(_) => {
                ApiError::Unauthorized("Access token is malformed".to_string())
            }
            SessionError::InvalidSignature | SessionError::Expired => {
                ApiError::Unauthorized(err.to_string())
            }
            // Unknown email and wrong password must look the same.
            SessionError::InvalidCredentials | SessionError::AccountNotFound => {
                ApiError::Unauthorized(LOGIN_FAILED_MESSAGE.to_string())
            }
            SessionError::RefreshTokenNotFound | SessionError::InvalidRefreshToken => {
                ApiError::Unauthorized(SessionError::InvalidRefreshToken.to_string())
            }
            SessionError::RefreshTokenExpired | SessionError::RefreshTokenRevoked => {
                ApiError::Unauthorized(err.to_string())
            }
            SessionError::TokenIssuance(_)
            | SessionError::Internal(_)
            | SessionError::StoreFailure(_) => ApiError::internal(err),
        }
    }
}

impl From<ChirpError> for ApiError {
    fn from(err: ChirpError) -> Self {
        match err {
            ChirpError::InvalidBody(ChirpBodyError::TooLong { .. }) => {
                ApiError::BadRequest("Chirp is too long".to_string())
            }
            ChirpError::InvalidBody(_)
            | ChirpError::InvalidChirpId(_)
            | ChirpError::InvalidAuthorId(_)
            | ChirpError::InvalidSortOrder(_) => ApiError::BadRequest(err.to_string()),
            ChirpError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ChirpError::NotOwner { .. } => {
                ApiError::Forbidden("You can only delete your own chirps".to_string())
            }
            ChirpError::DatabaseError(_) | ChirpError::Unknown(_) => ApiError::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_chirpy_red: bool,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
            is_chirpy_red: account.is_chirpy_red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpData {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: String,
}

impl From<&Chirp> for ChirpData {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body.as_str().to_string(),
            user_id: chirp.author_id.to_string(),
        }
    }
}

/// Raw `Authorization` header value, if present and valid UTF-8.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}
