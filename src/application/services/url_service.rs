//! Short URL creation and resolution service.
//!
//! This is where the store and the cache are kept consistent. The store is
//! authoritative: its failures always reach the caller. The cache is an
//! optimization: its failures are logged and absorbed, never surfaced.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::NewShortUrl;
use crate::domain::repositories::{StoreError, UrlStore};
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

/// Tunables for [`UrlService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlServiceOptions {
    /// Length of generated codes.
    pub code_length: usize,
    /// How many codes to try before giving up on duplicate-code rejections.
    pub max_code_attempts: usize,
}

impl Default for UrlServiceOptions {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: 5,
        }
    }
}

/// Service for shortening URLs and resolving short codes.
pub struct UrlService {
    store: Arc<dyn UrlStore>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn CodeGenerator>,
    options: UrlServiceOptions,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(
        store: Arc<dyn UrlStore>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn CodeGenerator>,
        options: UrlServiceOptions,
    ) -> Self {
        Self {
            store,
            cache,
            generator,
            options,
        }
    }

    /// Creates a short code for `original_url`.
    ///
    /// The record is written to the store first; only after the store
    /// acknowledges it is the cache populated, and a cache failure does not
    /// affect the result.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged. A [`StoreError::DuplicateCode`]
    /// triggers regeneration; it is returned only once
    /// `max_code_attempts` codes have all been rejected.
    pub async fn shorten(&self, original_url: &str) -> Result<String, StoreError> {
        let attempts = self.options.max_code_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            let code = self.generator.generate(self.options.code_length);
            let new_url = NewShortUrl::now(code, original_url);

            match self.store.save(new_url).await {
                Ok(stored) => {
                    debug!(code = %stored.code, id = stored.id, "Stored short URL");
                    self.populate_cache(&stored.code, &stored.original_url).await;
                    return Ok(stored.code);
                }
                Err(StoreError::DuplicateCode(code)) => {
                    warn!(%code, attempt, "Generated code already taken, retrying");
                    last_err = Some(StoreError::DuplicateCode(code));
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| StoreError::Unavailable("no code attempts made".into())))
    }

    /// Returns the original URL for `code`.
    ///
    /// Reads the cache first. On a miss, or any cache failure, reads the store
    /// and then repopulates the cache before returning.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged, including [`StoreError::NotFound`].
    pub async fn resolve(&self, code: &str) -> Result<String, StoreError> {
        match self.cache.get_url(code).await {
            Ok(url) => return Ok(url),
            Err(e) if e.is_miss() => debug!(%code, "Cache miss, reading store"),
            Err(e) => warn!(%code, error = %e, "Cache read failed, falling back to store"),
        }

        let url = self.store.get(code).await?;
        self.populate_cache(code, &url).await;

        Ok(url)
    }

    async fn populate_cache(&self, code: &str, original_url: &str) {
        if let Err(e) = self.cache.set_url(code, original_url).await {
            warn!(%code, error = %e, "Failed to populate cache");
        }
    }
}
