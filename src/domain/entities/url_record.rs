//! Record entity representing one shortened URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL and its metadata.
///
/// `key` is the short code and the record's identity. It never changes after
/// creation, neither do `short_url`, `long_url` or `creation_date`. `clicks`
/// only grows.
///
/// # Wire format
///
/// Serializes with the field names external callers depend on:
///
/// ```json
/// {
///   "Key": "1c",
///   "ShortUrl": "http://s.example.com/1c",
///   "LongUrl": "http://example.com/x",
///   "CreationDate": 1700000000000000000,
///   "Clicks": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UrlRecord {
    pub key: String,
    pub short_url: String,
    pub long_url: String,
    /// Nanoseconds since the Unix epoch.
    pub creation_date: i64,
    pub clicks: u64,
}

impl UrlRecord {
    /// Creates a fresh record stamped with the current time and zero clicks.
    pub fn new(key: String, short_url: String, long_url: String) -> Self {
        Self {
            key,
            short_url,
            long_url,
            creation_date: now_nanos(),
            clicks: 0,
        }
    }

    /// Creation time as a calendar timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.creation_date)
    }
}

/// Current time in nanoseconds since the epoch, saturating past year 2262.
fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}
