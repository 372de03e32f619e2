#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use dashmap::DashMap;
use std::sync::Arc;
use url_shortener::api::routes::public_routes;
use url_shortener::application::services::{UrlService, UrlServiceOptions};
use url_shortener::domain::repositories::UrlStore;
use url_shortener::infrastructure::cache::{CacheError, CacheResult, CacheService, NullCache};
use url_shortener::infrastructure::persistence::InMemoryUrlStore;
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::CodeGenerator;

/// Always hands out the same code.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self, _length: usize) -> String {
        self.0.to_string()
    }
}

/// Cache that keeps entries in a map so tests can inspect and evict them.
#[derive(Default)]
pub struct MapCache {
    entries: DashMap<String, String>,
}

impl MapCache {
    pub fn get(&self, code: &str) -> Option<String> {
        self.entries.get(code).map(|v| v.value().clone())
    }

    pub fn evict(&self, code: &str) {
        self.entries.remove(code);
    }
}

#[async_trait]
impl CacheService for MapCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<String> {
        self.get(short_code).ok_or(CacheError::Miss)
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        self.entries
            .insert(short_code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Cache whose backend is gone.
pub struct BrokenCache;

#[async_trait]
impl CacheService for BrokenCache {
    async fn get_url(&self, _short_code: &str) -> CacheResult<String> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set_url(&self, _short_code: &str, _original_url: &str) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_test_state(
    store: Arc<dyn UrlStore>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn CodeGenerator>,
) -> AppState {
    let service = UrlService::new(
        store.clone(),
        cache.clone(),
        generator,
        UrlServiceOptions::default(),
    );

    AppState::new(Arc::new(service), store, cache)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(public_routes().with_state(state)).unwrap()
}

/// Server over an empty in-memory store, no cache, and codes fixed to `"abcdef"`.
pub fn default_server() -> TestServer {
    let state = create_test_state(
        Arc::new(InMemoryUrlStore::new()),
        Arc::new(NullCache::new()),
        Arc::new(FixedCodeGenerator("abcdef")),
    );
    test_server(state)
}
