//! Handlers for the most recently created links.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the ten newest records, newest first.
///
/// # Endpoint
///
/// `GET /latest`
///
/// # Errors
///
/// Returns 503 Service Unavailable if the backend cannot be reached.
pub async fn latest_handler(State(state): State<AppState>) -> Result<Json<Vec<UrlRecord>>, AppError> {
    let records = state.link_service.latest(None).await?;
    Ok(Json(records))
}

/// Returns up to `n` newest records, newest first.
///
/// # Endpoint
///
/// `GET /latest/{n}`
///
/// A count that is not a non-negative integer falls back to ten. Codes whose
/// record is missing are skipped, so fewer than `n` records may be returned.
///
/// # Errors
///
/// Returns 503 Service Unavailable if the backend cannot be reached.
pub async fn latest_count_handler(
    Path(n): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlRecord>>, AppError> {
    let records = state.link_service.latest(Some(&n)).await?;
    Ok(Json(records))
}
