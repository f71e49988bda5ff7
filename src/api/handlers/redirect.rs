//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::handlers::info_handler;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. A trailing `+` selects the info page instead (see [`info_handler`])
/// 2. Load the record through [`crate::application::services::LinkService::resolve`],
///    which queues the click for the background worker
/// 3. Return 307 Temporary Redirect to the long URL
///
/// Unknown codes are redirected to the configured fallback URL.
///
/// # Errors
///
/// Returns 503 Service Unavailable if the backend cannot be reached.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if let Some(code) = code.strip_suffix('+') {
        let record = info_handler(Path(code.to_string()), State(state)).await?;
        return Ok(record.into_response());
    }

    match state.link_service.resolve(&code).await {
        Ok(long_url) => Ok(Redirect::temporary(&long_url).into_response()),
        Err(AppError::NotFound { .. }) => {
            debug!(code = %code, "Unknown code, redirecting to fallback");
            Ok(Redirect::temporary(&state.not_found_url).into_response())
        }
        Err(e) => Err(e),
    }
}
