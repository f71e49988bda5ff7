//! Redis-backed key-value store.

use super::backend::{KvBackend, KvError, KvResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis implementation of [`KvBackend`].
///
/// Uses a multiplexed `ConnectionManager` that reconnects on failure. Cloning
/// the manager is cheap, each call works on its own handle. Errors are
/// returned to the caller, never swallowed here.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
}

impl RedisBackend {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`KvError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> KvResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| KvError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| KvError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| KvError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { manager })
    }
}

fn parse_int(key: &str, raw: Option<String>) -> KvResult<Option<i64>> {
    raw.map(|v| {
        v.parse::<i64>()
            .map_err(|_| KvError::NotAnInteger { key: key.to_string() })
    })
    .transpose()
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn incr(&self, key: &str) -> KvResult<i64> {
        let mut conn = self.manager.clone();
        let value: i64 = conn.incr(key, 1).await?;
        debug!(key, value, "INCR");
        Ok(value)
    }

    async fn get_int(&self, key: &str) -> KvResult<Option<i64>> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn.get(key).await?;
        parse_int(key, raw)
    }

    async fn hset_multiple(&self, key: &str, fields: &[(&str, String)]) -> KvResult<()> {
        let mut conn = self.manager.clone();
        conn.hset_multiple::<_, _, _, ()>(key, fields).await?;
        debug!(key, fields = fields.len(), "HSET");
        Ok(())
    }

    async fn hexists(&self, key: &str, field: &str) -> KvResult<bool> {
        let mut conn = self.manager.clone();
        let exists: bool = conn.hexists(key, field).await?;
        Ok(exists)
    }

    async fn hmget(&self, key: &str, fields: &[&str]) -> KvResult<Vec<Option<String>>> {
        let mut conn = self.manager.clone();
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        Ok(values)
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> KvResult<i64> {
        let mut conn = self.manager.clone();
        let value: i64 = conn.hincr(key, field, delta).await?;
        debug!(key, field, value, "HINCRBY");
        Ok(value)
    }

    async fn ping(&self) -> bool {
        let mut conn = self.manager.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
