use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::ChirpId;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_chirp(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(chirp_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let chirp_id = ChirpId::from_string(&chirp_id).map_err(ChirpError::from)?;

    state
        .chirp_service
        .delete_chirp(&chirp_id, &caller.account_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
