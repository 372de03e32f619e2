//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// The URL is stored as given, without any scheme or format check. The one
/// exception is the empty string: a missing or empty `url` is rejected with
/// 400 here, before the service runs, although the service itself would
/// store an empty URL like any other.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,
}

/// Response carrying the generated short code.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    pub short_code: String,
}
