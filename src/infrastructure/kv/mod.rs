//! Key-value backend abstraction for durable state.
//!
//! Provides a [`KvBackend`] trait with two implementations:
//! - [`RedisBackend`] - Production Redis-backed store
//! - [`MemoryBackend`] - In-process store for tests and local development

mod backend;
mod memory_backend;
mod redis_backend;

pub use backend::{KvBackend, KvError, KvResult};
pub use memory_backend::MemoryBackend;
pub use redis_backend::RedisBackend;
