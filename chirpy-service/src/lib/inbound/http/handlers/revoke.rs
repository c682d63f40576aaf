use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::authorization_header;
use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state
        .session_service
        .revoke_session(authorization_header(&headers))
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
