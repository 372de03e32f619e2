//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

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
/// Resolution is delegated to [`crate::application::services::UrlService::resolve`],
/// which checks the cache first and falls back to the store.
///
/// # Errors
///
/// - 404 Not Found if the code was never issued.
/// - 503 Service Unavailable if the store cannot be reached or times out.
/// - 500 Internal Server Error if the stored URL cannot be used as a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.url_service.resolve(&code).await.map_err(|e| {
        if e.is_not_found() {
            AppError::not_found("URL not found", json!({ "code": code }))
        } else {
            error!(%code, error = %e, "Failed to resolve short code");
            AppError::unavailable("URL lookup failed", json!({ "code": code }))
        }
    })?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|_| {
        error!(%code, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL cannot be redirected to", json!({ "code": code }))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Rejects `GET /` since no code was given.
pub async fn missing_code_handler() -> AppError {
    AppError::bad_request("Short code is required", json!({}))
}
