//! API route configuration.

use crate::api::handlers::{
    health_handler, missing_code_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short code for a URL
/// - `GET  /health`  - Store and cache health
/// - `GET  /{code}`  - Redirect to the original URL
/// - `GET  /`        - Rejected with 400 (no code given)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(missing_code_handler))
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
}
