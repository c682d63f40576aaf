use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_account::ParseCredentialsRequestError;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::UpdateCredentialsCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Replace the caller's own email and password.
pub async fn update_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .update_credentials(&caller.account_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAccountRequest {
    email: String,
    password: String,
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateCredentialsCommand, ParseCredentialsRequestError> {
        Ok(UpdateCredentialsCommand {
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
        })
    }
}
