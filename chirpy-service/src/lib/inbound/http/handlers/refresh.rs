use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::authorization_header;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange the bearer refresh token for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    state
        .session_service
        .refresh(authorization_header(&headers))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Refresh rejected");
            ApiError::from(e)
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
