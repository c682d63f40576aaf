use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::models::LoginCommand;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let session = state
        .session_service
        .login(LoginCommand {
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Login failed");
            ApiError::from(e)
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            account: (&session.account).into(),
            token: session.access_token,
            refresh_token: session.refresh_token.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub account: AccountData,
    pub token: String,
    pub refresh_token: String,
}
