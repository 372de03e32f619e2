//! Redis-backed cache implementation.

use std::future::Future;
use std::time::Duration;

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache implementation for fast URL lookups.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Every command is bounded by `op_timeout`. Errors are returned as
/// [`CacheError`]; deciding to ignore them is the caller's job.
pub struct RedisCache {
    client: ConnectionManager,
    ttl: Option<Duration>,
    op_timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl` - expiration applied to cached entries; `None` keeps them until evicted
    /// - `op_timeout` - upper bound for the connect handshake and each command
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(
        redis_url: &str,
        ttl: Option<Duration>,
        op_timeout: Duration,
    ) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = tokio::time::timeout(op_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout(op_timeout))?
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        tokio::time::timeout(op_timeout, test_conn.ping::<()>())
            .await
            .map_err(|_| CacheError::Timeout(op_timeout))?
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl,
            op_timeout,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, short_code: &str) -> String {
        format!("{}{}", self.key_prefix, short_code)
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, RedisError>>,
    ) -> CacheResult<T> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) if e.is_io_error() || e.is_connection_dropped() => {
                Err(CacheError::Connection(e.to_string()))
            }
            Ok(Err(e)) => Err(CacheError::Operation(e.to_string())),
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<String> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        match self.bounded(conn.get::<_, Option<String>>(&key)).await? {
            Some(url) => {
                debug!("Cache HIT: {} -> {}", short_code, url);
                Ok(url)
            }
            None => {
                debug!("Cache MISS: {}", short_code);
                Err(CacheError::Miss)
            }
        }
    }

    async fn set_url(&self, short_code: &str, original_url: &str) -> CacheResult<()> {
        let key = self.build_key(short_code);
        let mut conn = self.client.clone();

        match self.ttl {
            Some(ttl) => {
                self.bounded(conn.set_ex::<_, _, ()>(&key, original_url, ttl.as_secs()))
                    .await?;
                debug!(
                    "Cache SET: {} -> {} (TTL: {}s)",
                    short_code,
                    original_url,
                    ttl.as_secs()
                );
            }
            None => {
                self.bounded(conn.set::<_, _, ()>(&key, original_url))
                    .await?;
                debug!("Cache SET: {} -> {}", short_code, original_url);
            }
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        self.bounded(conn.ping::<()>()).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_times_out_against_unresponsive_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let bound = Duration::from_millis(300);
        let result = RedisCache::connect(&format!("redis://{addr}/0"), None, bound).await;

        match result {
            Err(CacheError::Timeout(elapsed)) => assert_eq!(elapsed, bound),
            Err(other) => panic!("expected a timeout, got {other:?}"),
            Ok(_) => panic!("connected to a server that never answers"),
        }
    }
}
