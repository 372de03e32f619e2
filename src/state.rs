//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::cache::CacheService;

/// Process-wide state shared by all in-flight requests.
///
/// `store` and `cache` are the same instances the service uses; handlers only
/// touch them directly for health probes.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub store: Arc<dyn UrlStore>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService>,
        store: Arc<dyn UrlStore>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            url_service,
            store,
            cache,
        }
    }
}
