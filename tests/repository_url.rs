//! PostgreSQL store tests. Need a reachable `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use url_shortener::domain::entities::NewShortUrl;
use url_shortener::domain::repositories::{StoreError, UrlStore};
use url_shortener::infrastructure::persistence::PgUrlStore;

fn store(pool: PgPool) -> PgUrlStore {
    PgUrlStore::new(Arc::new(pool), Duration::from_secs(5))
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_save_and_get(pool: PgPool) {
    let repo = store(pool);

    let saved = repo
        .save(NewShortUrl::now("abc123", "https://example.com"))
        .await
        .unwrap();

    assert!(saved.id > 0);
    assert_eq!(saved.code, "abc123");
    assert_eq!(saved.original_url, "https://example.com");

    let url = repo.get("abc123").await.unwrap();
    assert_eq!(url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_get_unknown_code(pool: PgPool) {
    let repo = store(pool);

    let result = repo.get("nope00").await;

    assert_eq!(result, Err(StoreError::NotFound("nope00".to_string())));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_code_is_rejected(pool: PgPool) {
    let repo = store(pool.clone());

    repo.save(NewShortUrl::now("dup001", "https://first.example"))
        .await
        .unwrap();

    let result = repo
        .save(NewShortUrl::now("dup001", "https://second.example"))
        .await;

    assert_eq!(result.unwrap_err(), StoreError::DuplicateCode("dup001".to_string()));
    assert_eq!(repo.get("dup001").await.unwrap(), "https://first.example");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls WHERE code = $1")
        .bind("dup001")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_ids_are_distinct_from_codes(pool: PgPool) {
    let repo = store(pool);

    let first = repo
        .save(NewShortUrl::now("aaaaaa", "https://a.example"))
        .await
        .unwrap();
    let second = repo
        .save(NewShortUrl::now("bbbbbb", "https://b.example"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_ping(pool: PgPool) {
    let repo = store(pool);

    assert!(repo.ping().await.is_ok());
}
