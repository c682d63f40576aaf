use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::authorization_header;
use super::ApiError;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

const USER_UPGRADED: &str = "user.upgraded";

/// Payment provider callback. Only `user.upgraded` has an effect; other
/// events are acknowledged and ignored.
///
/// The payload is parsed only after the API key matches, so unauthenticated
/// callers always get 401 whatever they send.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<StatusCode, ApiError> {
    let api_key = auth::extract_api_key(authorization_header(&headers))
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    if api_key != &*state.polka_api_key {
        tracing::warn!("Webhook rejected: API key mismatch");
        return Err(ApiError::Unauthorized("Invalid API key".to_string()));
    }

    let body: PolkaWebhookRequest = serde_json::from_slice(&payload)
        .map_err(|e| ApiError::BadRequest(format!("Invalid webhook payload: {}", e)))?;

    if body.event != USER_UPGRADED {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let account_id = AccountId::from_string(&body.data.user_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .account_service
        .upgrade_subscription(&account_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookRequest {
    event: String,
    #[serde(default)]
    data: PolkaWebhookData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookData {
    #[serde(default)]
    user_id: String,
}
