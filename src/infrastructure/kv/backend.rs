//! Backend trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Backend connection error: {0}")]
    Connection(String),

    #[error("Backend operation error: {0}")]
    Operation(String),

    #[error("Value stored under '{key}' is not an integer")]
    NotAnInteger { key: String },
}

impl From<redis::RedisError> for KvError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() {
            Self::Connection(e.to_string())
        } else {
            Self::Operation(e.to_string())
        }
    }
}

/// Result type for backend operations.
pub type KvResult<T> = Result<T, KvError>;

/// Primitive operations the record store needs from a key-value store.
///
/// The model is Redis: plain keys holding integers plus per-key hashes of
/// field/value pairs. Every method is a single round trip and every
/// mutation is atomic on the server side. Implementations hold no locks
/// across calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::kv::RedisBackend`] - `INCR`, `GET`, `HSET`, `HEXISTS`, `HMGET`, `HINCRBY`
/// - [`crate::infrastructure::kv::MemoryBackend`] - same semantics behind a mutex
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Atomically increments the integer at `key` and returns the new value.
    ///
    /// A missing key counts as 0, so the first call returns 1.
    async fn incr(&self, key: &str) -> KvResult<i64>;

    /// Reads the integer at `key`, `None` if the key does not exist.
    async fn get_int(&self, key: &str) -> KvResult<Option<i64>>;

    /// Writes all `fields` of the hash at `key` in one atomic command.
    ///
    /// Existing fields with the same names are overwritten.
    async fn hset_multiple(&self, key: &str, fields: &[(&str, String)]) -> KvResult<()>;

    /// Returns true if the hash at `key` has `field`.
    async fn hexists(&self, key: &str, field: &str) -> KvResult<bool>;

    /// Reads `fields` of the hash at `key`, in order. Missing fields are `None`.
    async fn hmget(&self, key: &str, fields: &[&str]) -> KvResult<Vec<Option<String>>>;

    /// Atomically adds `delta` to the integer `field` of the hash at `key`.
    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> KvResult<i64>;

    /// Checks if the backend is reachable.
    async fn ping(&self) -> bool;

    /// Short name used in logs and health output.
    fn name(&self) -> &'static str;
}
