use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordError;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::inbound::http::router::AppState;

pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .create_account(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
pub(super) enum ParseCredentialsRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),
}

impl CreateAccountRequest {
    fn try_into_command(self) -> Result<CreateAccountCommand, ParseCredentialsRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(CreateAccountCommand::new(email, password))
    }
}

impl From<ParseCredentialsRequestError> for ApiError {
    fn from(err: ParseCredentialsRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
