//! Handlers for link shortening endpoints.

use axum::{
    Form,
    extract::{Path, Query, State, rejection::FormRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::shorten::ShortenParams;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens the URL given in the `url` parameter.
///
/// # Endpoint
///
/// `GET /shorten?url=...&home=...` or `POST /shorten` with a urlencoded form
///
/// On POST, fields of the form body take precedence over the query string,
/// and a request without a form body is read from the query string alone.
///
/// # Response
///
/// `301 Moved Permanently` to the info page of the new link (`{short_url}+`),
/// or to `/` when `home` is non-empty.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing, empty or malformed.
/// Returns 503 Service Unavailable if the backend cannot be reached.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Query(query): Query<ShortenParams>,
    form: Result<Form<ShortenParams>, FormRejection>,
) -> Result<Response, AppError> {
    let params = match form {
        Ok(Form(body)) => body.or(query),
        Err(_) => query,
    };
    let raw_url = params.url.clone().unwrap_or_default();
    shorten_and_redirect(&state, &raw_url, &params).await
}

/// Shortens the URL written after `/shorten/`.
///
/// # Endpoint
///
/// `GET /shorten/{*url}`
///
/// A `url` parameter, when present, takes precedence over the path.
///
/// # Errors
///
/// Same as [`shorten_handler`].
pub async fn shorten_path_handler(
    State(state): State<AppState>,
    Path(path_url): Path<String>,
    Query(params): Query<ShortenParams>,
) -> Result<Response, AppError> {
    let raw_url = params.url.clone().unwrap_or(path_url);
    shorten_and_redirect(&state, &raw_url, &params).await
}

async fn shorten_and_redirect(
    state: &AppState,
    raw_url: &str,
    params: &ShortenParams,
) -> Result<Response, AppError> {
    let record = state.link_service.shorten(raw_url).await?;

    let location = if params.wants_home() {
        "/".to_string()
    } else {
        format!("{}+", record.short_url)
    };

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
