mod common;

use axum::http::header;
use serde_json::json;
use std::sync::Arc;
use url_shortener::domain::entities::NewShortUrl;
use url_shortener::domain::repositories::UrlStore;
use url_shortener::infrastructure::persistence::InMemoryUrlStore;

use common::{BrokenCache, FixedCodeGenerator, MapCache};

#[tokio::test]
async fn test_shorten_then_redirect() {
    let server = common::default_server();

    server
        .post("/shorten")
        .json(&json!({ "url": "http://example.com" }))
        .await
        .assert_status_ok();

    let response = server.get("/abcdef").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    response.assert_header(header::LOCATION, "http://example.com");
}

#[tokio::test]
async fn test_redirect_unknown_code() {
    let server = common::default_server();

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["code"], "doesnotexist");
}

#[tokio::test]
async fn test_redirect_without_code() {
    let server = common::default_server();

    let response = server.get("/").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_redirect_falls_back_to_store_and_repopulates_cache() {
    let store = Arc::new(InMemoryUrlStore::new());
    let cache = Arc::new(MapCache::default());
    store
        .save(NewShortUrl::now("Ab3dE9", "https://docs.rs"))
        .await
        .unwrap();

    let state = common::create_test_state(
        store.clone(),
        cache.clone(),
        Arc::new(FixedCodeGenerator("unused")),
    );
    let server = common::test_server(state);

    assert!(cache.get("Ab3dE9").is_none());

    let response = server.get("/Ab3dE9").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    response.assert_header(header::LOCATION, "https://docs.rs");
    assert_eq!(cache.get("Ab3dE9").as_deref(), Some("https://docs.rs"));
}

#[tokio::test]
async fn test_redirect_after_cache_eviction() {
    let store = Arc::new(InMemoryUrlStore::new());
    let cache = Arc::new(MapCache::default());
    let state = common::create_test_state(
        store,
        cache.clone(),
        Arc::new(FixedCodeGenerator("abcdef")),
    );
    let server = common::test_server(state);

    server
        .post("/shorten")
        .json(&json!({ "url": "http://example.com/page" }))
        .await
        .assert_status_ok();

    cache.evict("abcdef");

    let response = server.get("/abcdef").await;
    response.assert_header(header::LOCATION, "http://example.com/page");
    assert_eq!(cache.get("abcdef").as_deref(), Some("http://example.com/page"));
}

#[tokio::test]
async fn test_redirect_with_broken_cache() {
    let store = Arc::new(InMemoryUrlStore::new());
    store
        .save(NewShortUrl::now("abcdef", "http://example.com"))
        .await
        .unwrap();

    let state = common::create_test_state(
        store,
        Arc::new(BrokenCache),
        Arc::new(FixedCodeGenerator("abcdef")),
    );
    let server = common::test_server(state);

    let response = server.get("/abcdef").await;

    response.assert_status(axum::http::StatusCode::FOUND);
    response.assert_header(header::LOCATION, "http://example.com");
}
