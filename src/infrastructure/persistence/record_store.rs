//! Counter and URL records stored as Redis-style hashes.
//!
//! # Layout
//!
//! ```text
//! __counter__            integer, last allocated counter value
//! <code>                 hash
//!   LongUrl              target URL
//!   ShortUrl             public short URL (presence marks the record as existing)
//!   CreationDate         nanoseconds since epoch
//!   Clicks               integer
//! ```

use async_trait::async_trait;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::infrastructure::kv::KvBackend;
use crate::utils::code_generator::Encoder;

/// Reserved key of the global counter. Contains `_`, which no alphabet may use.
pub const COUNTER_KEY: &str = "__counter__";

const FIELD_LONG_URL: &str = "LongUrl";
const FIELD_SHORT_URL: &str = "ShortUrl";
const FIELD_CREATION_DATE: &str = "CreationDate";
const FIELD_CLICKS: &str = "Clicks";

/// How record writes are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceMode {
    /// The single multi-field write is awaited before the record is returned.
    #[default]
    Sync,
    /// The write is spawned and not awaited. A failure is logged and lost, and
    /// a reader may briefly miss a record that was already handed out.
    BestEffort,
}

impl FromStr for PersistenceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sync" => Ok(Self::Sync),
            "async" | "best-effort" => Ok(Self::BestEffort),
            other => Err(format!(
                "PERSISTENCE_MODE must be 'sync' or 'async', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for PersistenceMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::BestEffort => write!(f, "async"),
        }
    }
}

/// [`RecordRepository`] backed by a [`KvBackend`].
pub struct RecordStore {
    backend: Arc<dyn KvBackend>,
    encoder: Encoder,
    mode: PersistenceMode,
}

impl RecordStore {
    /// Creates a store.
    ///
    /// Codes are looked up only if `encoder` could have produced them. Since
    /// no alphabet may contain `_`, that also keeps lookups off [`COUNTER_KEY`].
    pub fn new(backend: Arc<dyn KvBackend>, encoder: Encoder, mode: PersistenceMode) -> Self {
        Self {
            backend,
            encoder,
            mode,
        }
    }

    pub fn mode(&self) -> PersistenceMode {
        self.mode
    }

    fn record_fields(record: &UrlRecord) -> Vec<(&'static str, String)> {
        vec![
            (FIELD_LONG_URL, record.long_url.clone()),
            (FIELD_SHORT_URL, record.short_url.clone()),
            (FIELD_CREATION_DATE, record.creation_date.to_string()),
            (FIELD_CLICKS, record.clicks.to_string()),
        ]
    }
}

fn counter_value(raw: i64) -> Result<u64, AppError> {
    u64::try_from(raw).map_err(|_| {
        AppError::internal(
            "Counter holds a negative value",
            json!({ "key": COUNTER_KEY, "value": raw }),
        )
    })
}

fn corrupt(code: &str, field: &str) -> AppError {
    AppError::internal(
        "Stored record is incomplete or corrupt",
        json!({ "code": code, "field": field }),
    )
}

#[async_trait]
impl RecordRepository for RecordStore {
    async fn allocate_code(&self) -> Result<u64, AppError> {
        let value = self.backend.incr(COUNTER_KEY).await?;
        counter_value(value)
    }

    async fn create_record(
        &self,
        code: &str,
        short_url: &str,
        long_url: &str,
    ) -> Result<UrlRecord, AppError> {
        let record = UrlRecord::new(code.to_string(), short_url.to_string(), long_url.to_string());
        let fields = Self::record_fields(&record);

        match self.mode {
            PersistenceMode::Sync => {
                self.backend.hset_multiple(code, &fields).await?;
                debug!(code, "Record stored");
            }
            PersistenceMode::BestEffort => {
                let backend = self.backend.clone();
                let key = record.key.clone();
                tokio::spawn(async move {
                    match backend.hset_multiple(&key, &fields).await {
                        Ok(()) => debug!(code = %key, "Record stored"),
                        Err(e) => warn!(code = %key, error = %e, "Detached record write failed"),
                    }
                });
            }
        }

        Ok(record)
    }

    async fn load_record(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        if !self.encoder.can_produce(code) {
            debug!(code = %code, "Not a code of this alphabet");
            return Ok(None);
        }

        if !self.backend.hexists(code, FIELD_SHORT_URL).await? {
            return Ok(None);
        }

        let values = self
            .backend
            .hmget(
                code,
                &[FIELD_LONG_URL, FIELD_SHORT_URL, FIELD_CREATION_DATE, FIELD_CLICKS],
            )
            .await?;

        let [long_url, short_url, creation_date, clicks]: [Option<String>; 4] = values
            .try_into()
            .map_err(|_| corrupt(code, "*"))?;

        // ShortUrl can vanish between HEXISTS and HMGET only if the key was replaced.
        let short_url = short_url.ok_or_else(|| corrupt(code, FIELD_SHORT_URL))?;
        let long_url = long_url.ok_or_else(|| corrupt(code, FIELD_LONG_URL))?;
        let creation_date = creation_date
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| corrupt(code, FIELD_CREATION_DATE))?;
        let clicks = clicks
            .and_then(|v| v.parse::<u64>().ok())
            .ok_or_else(|| corrupt(code, FIELD_CLICKS))?;

        Ok(Some(UrlRecord {
            key: code.to_string(),
            short_url,
            long_url,
            creation_date,
            clicks,
        }))
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        if !self.encoder.can_produce(code) {
            return Ok(());
        }

        let clicks = self.backend.hincrby(code, FIELD_CLICKS, 1).await?;
        debug!(code, clicks, "Click counted");
        Ok(())
    }

    async fn current_counter(&self) -> Result<u64, AppError> {
        match self.backend.get_int(COUNTER_KEY).await? {
            Some(value) => counter_value(value),
            None => Ok(0),
        }
    }

    async fn latest(&self, n: u64) -> Result<Vec<UrlRecord>, AppError> {
        let last = self.current_counter().await?;
        let first = last.saturating_sub(n).saturating_add(1).max(1);

        let mut records = Vec::new();
        for value in (first..=last).rev() {
            let code = self.encoder.encode(value);
            match self.load_record(&code).await? {
                Some(record) => records.push(record),
                None => debug!(code = %code, value, "No record for counter value, skipping"),
            }
        }

        Ok(records)
    }

    async fn health_check(&self) -> bool {
        self.backend.ping().await
    }
}
