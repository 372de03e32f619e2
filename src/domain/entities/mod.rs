//! Core domain entities.
//!
//! - [`ShortUrl`] - a persisted code to URL mapping
//! - [`NewShortUrl`] - the same mapping before the store assigns an id

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
