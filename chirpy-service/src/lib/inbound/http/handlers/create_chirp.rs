use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::ChirpBody;
use crate::chirp::models::CreateChirpCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Json(body): Json<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let command = CreateChirpCommand {
        author_id: caller.account_id,
        body: ChirpBody::new(body.body).map_err(ChirpError::from)?,
    };

    state
        .chirp_service
        .create_chirp(command)
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}
