//! Application layer services.
//!
//! [`services::UrlService`] coordinates the store, the cache and the code
//! generator; HTTP handlers only talk to it.

pub mod services;
