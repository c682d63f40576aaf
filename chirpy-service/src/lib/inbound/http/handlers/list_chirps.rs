use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::account::models::AccountId;
use crate::chirp::errors::ChirpError;
use crate::chirp::models::ListChirpsQuery;
use crate::chirp::models::SortOrder;
use crate::inbound::http::router::AppState;

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(params): Query<ListChirpsParams>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    state
        .chirp_service
        .list_chirps(params.try_into_query()?)
        .await
        .map_err(ApiError::from)
        .map(|chirps| ApiSuccess::new(StatusCode::OK, chirps.iter().map(ChirpData::from).collect()))
}

/// Query string of `GET /api/chirps`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListChirpsParams {
    author_id: Option<String>,
    sort: Option<String>,
}

impl ListChirpsParams {
    fn try_into_query(self) -> Result<ListChirpsQuery, ChirpError> {
        let author_id = self
            .author_id
            .as_deref()
            .map(AccountId::from_string)
            .transpose()?;
        let sort = self.sort.as_deref().map(str::parse::<SortOrder>).transpose()?;

        Ok(ListChirpsQuery {
            author_id,
            sort: sort.unwrap_or_default(),
        })
    }
}
