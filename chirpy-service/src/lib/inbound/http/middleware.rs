use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::authorization_header;
use super::handlers::ApiError;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated account in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
}

/// Middleware that resolves the bearer access token and adds the account to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let account_id = state
        .session_service
        .authenticate(authorization_header(req.headers()))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut()
        .insert(AuthenticatedAccount { account_id });

    Ok(next.run(req).await)
}

/// Middleware that counts requests served under `/api`
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.metrics.record_hit();
    next.run(req).await
}
