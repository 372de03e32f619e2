//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{StoreError, UrlStore};
use crate::utils::db_error::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for ShortUrl {
    fn from(row: UrlRow) -> Self {
        ShortUrl::new(row.id, row.code, row.original_url, row.created_at)
    }
}

/// PostgreSQL store for short URLs, backed by the `urls` table.
///
/// Each query runs under `timeout`; the `UNIQUE (code)` constraint guarantees
/// that an insert never overwrites an existing record.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgUrlStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T>(
        &self,
        code: &str,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(|e| map_sqlx_error(e, code, self.timeout)),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn save(&self, new_url: NewShortUrl) -> Result<ShortUrl, StoreError> {
        let query = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (code, original_url, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, code, original_url, created_at
            "#,
        )
        .bind(&new_url.code)
        .bind(&new_url.original_url)
        .bind(new_url.created_at)
        .fetch_one(self.pool.as_ref());

        let row = self.bounded(&new_url.code, query).await?;

        Ok(row.into())
    }

    async fn get(&self, code: &str) -> Result<String, StoreError> {
        let query = sqlx::query_scalar::<_, String>("SELECT original_url FROM urls WHERE code = $1")
            .bind(code)
            .fetch_optional(self.pool.as_ref());

        self.bounded(code, query)
            .await?
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let query = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref());

        self.bounded("", query).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use tokio::net::TcpListener;

    /// Accepts connections and never writes a byte back.
    async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("postgres://user:pass@{addr}/urlshortener")
    }

    #[tokio::test]
    async fn test_calls_time_out_against_unresponsive_database() {
        let url = silent_server().await;
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(30))
            .connect_lazy(&url)
            .unwrap();
        let bound = Duration::from_millis(300);
        let store = PgUrlStore::new(Arc::new(pool), bound);

        let started = std::time::Instant::now();

        assert_eq!(store.get("abcdef").await, Err(StoreError::Timeout(bound)));
        assert_eq!(
            store
                .save(NewShortUrl::now("abcdef", "http://example.com"))
                .await,
            Err(StoreError::Timeout(bound))
        );
        assert_eq!(store.ping().await, Err(StoreError::Timeout(bound)));

        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
