//! Cache service trait and error types.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// None of these ever reach an HTTP client: the URL service treats a miss as
/// routine and every other variant as a reason to fall back to the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache miss")]
    Miss,

    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("cache connection error: {0}")]
    Connection(String),

    #[error("cache operation error: {0}")]
    Operation(String),
}

impl CacheError {
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short code → original URL mappings.
///
/// Implementations must be thread-safe. Entries never change once written, so
/// a cached value is either absent or correct.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with optional TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Miss`] when the code is not cached, or another
    /// [`CacheError`] when the backend fails.
    async fn get_url(&self, short_code: &str) -> CacheResult<String>;

    /// Stores a mapping. Callers must treat failure as non-fatal.
    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
