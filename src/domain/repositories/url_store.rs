//! Store trait for short URL persistence.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{NewShortUrl, ShortUrl};

/// Failures reported by a [`UrlStore`].
///
/// `NotFound` is a routine outcome. The remaining variants are persistence
/// failures and are always surfaced to the caller of the service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no short URL found for code '{0}'")]
    NotFound(String),

    #[error("short code '{0}' already exists")]
    DuplicateCode(String),

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for connectivity, timeout and write-rejection failures.
    pub fn is_persistence(&self) -> bool {
        !self.is_not_found()
    }
}

/// System of record for short URLs.
///
/// Records are only ever created or read. Implementations must reject a save
/// whose code already exists instead of overwriting it, and must bound every
/// call by a timeout.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlStore`] - `DashMap` implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Persists a new record and returns it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code is already taken,
    /// [`StoreError::Timeout`] or [`StoreError::Unavailable`] on backend failures.
    async fn save(&self, new_url: NewShortUrl) -> Result<ShortUrl, StoreError>;

    /// Looks up the original URL for a code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no record matches.
    async fn get(&self, code: &str) -> Result<String, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
