//! Handler for link information.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record of a short code. Does not count a click.
///
/// # Endpoint
///
/// `GET /info/{code}` or `GET /{code}+`
///
/// # Response
///
/// ```json
/// {
///   "Key": "1c",
///   "ShortUrl": "http://s.example.com/1c",
///   "LongUrl": "http://example.com/x",
///   "CreationDate": 1700000000000000000,
///   "Clicks": 3
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code has no record.
/// Returns 503 Service Unavailable if the backend cannot be reached.
pub async fn info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlRecord>, AppError> {
    let record = state.link_service.info(&code).await?;
    Ok(Json(record))
}
