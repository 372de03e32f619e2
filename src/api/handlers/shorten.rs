//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use tracing::error;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_code": "aZ3kP9" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not valid JSON, lacks `url`, or `url` is empty.
///   The service is not called in that case.
/// - 500 Internal Server Error on any store failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let short_code = state
        .url_service
        .shorten(&payload.url)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to shorten URL");
            AppError::internal("Failed to shorten URL", json!({}))
        })?;

    Ok(Json(ShortenResponse { short_code }))
}
