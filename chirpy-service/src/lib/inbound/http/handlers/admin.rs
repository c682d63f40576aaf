use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn healthz() -> &'static str {
    "OK"
}

pub async fn metrics(State(state): State<AppState>) -> ApiSuccess<MetricsResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MetricsResponseData {
            hits: state.metrics.hits(),
        },
    )
}

/// Wipe all accounts (and everything they own) and the hit counter.
/// Only available on the development platform.
pub async fn reset(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ResetResponseData>, ApiError> {
    if !state.development {
        return Err(ApiError::Forbidden(
            "Reset is only allowed in the dev environment".to_string(),
        ));
    }

    let removed_accounts = state.account_service.reset().await?;
    state.metrics.reset();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetResponseData { removed_accounts },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsResponseData {
    pub hits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetResponseData {
    pub removed_accounts: u64,
}
