//! In-process key-value store.

use super::backend::{KvBackend, KvError, KvResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct Data {
    strings: HashMap<String, String>,
    hashes: HashMap<String, HashMap<String, String>>,
}

/// A [`KvBackend`] living in process memory.
///
/// Mirrors the Redis semantics the record store relies on: `incr` treats a
/// missing key as 0, hash writes overwrite fields, and using a key as both a
/// plain value and a hash is a type error. State is private to one process,
/// so it is only suitable for tests and single-instance development.
///
/// [`MemoryBackend::set_available`] simulates an outage: while unavailable,
/// every operation fails with [`KvError::Connection`].
pub struct MemoryBackend {
    data: Mutex<Data>,
    available: AtomicBool,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryBackend (state is not shared between processes)");
        Self {
            data: Mutex::new(Data::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggles simulated availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn lock(&self) -> KvResult<MutexGuard<'_, Data>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(KvError::Connection("Memory backend is unavailable".to_string()));
        }
        self.data
            .lock()
            .map_err(|_| KvError::Operation("Memory backend lock poisoned".to_string()))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn wrong_type(key: &str) -> KvError {
    KvError::Operation(format!(
        "WRONGTYPE Operation against key '{}' holding the wrong kind of value",
        key
    ))
}

fn parse_int(key: &str, raw: &str) -> KvResult<i64> {
    raw.parse()
        .map_err(|_| KvError::NotAnInteger { key: key.to_string() })
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn incr(&self, key: &str) -> KvResult<i64> {
        let mut data = self.lock()?;
        if data.hashes.contains_key(key) {
            return Err(wrong_type(key));
        }

        let current = match data.strings.get(key) {
            Some(raw) => parse_int(key, raw)?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| KvError::Operation("increment would overflow".to_string()))?;
        data.strings.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn get_int(&self, key: &str) -> KvResult<Option<i64>> {
        let data = self.lock()?;
        if data.hashes.contains_key(key) {
            return Err(wrong_type(key));
        }
        data.strings
            .get(key)
            .map(|raw| parse_int(key, raw))
            .transpose()
    }

    async fn hset_multiple(&self, key: &str, fields: &[(&str, String)]) -> KvResult<()> {
        let mut data = self.lock()?;
        if data.strings.contains_key(key) {
            return Err(wrong_type(key));
        }

        let hash = data.hashes.entry(key.to_string()).or_default();
        for (field, value) in fields {
            hash.insert((*field).to_string(), value.clone());
        }
        Ok(())
    }

    async fn hexists(&self, key: &str, field: &str) -> KvResult<bool> {
        let data = self.lock()?;
        if data.strings.contains_key(key) {
            return Err(wrong_type(key));
        }
        Ok(data
            .hashes
            .get(key)
            .is_some_and(|hash| hash.contains_key(field)))
    }

    async fn hmget(&self, key: &str, fields: &[&str]) -> KvResult<Vec<Option<String>>> {
        let data = self.lock()?;
        if data.strings.contains_key(key) {
            return Err(wrong_type(key));
        }

        let hash = data.hashes.get(key);
        Ok(fields
            .iter()
            .map(|field| hash.and_then(|h| h.get(*field)).cloned())
            .collect())
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> KvResult<i64> {
        let mut data = self.lock()?;
        if data.strings.contains_key(key) {
            return Err(wrong_type(key));
        }

        let hash = data.hashes.entry(key.to_string()).or_default();
        let current = match hash.get(field) {
            Some(raw) => parse_int(key, raw)?,
            None => 0,
        };
        let next = current
            .checked_add(delta)
            .ok_or_else(|| KvError::Operation("increment would overflow".to_string()))?;
        hash.insert(field.to_string(), next.to_string());
        Ok(next)
    }

    async fn ping(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
