//! Record store implementation on top of the key-value backend.
//!
//! - [`RecordStore`] - counter allocation and URL records for any [`crate::infrastructure::kv::KvBackend`]

pub mod record_store;

pub use record_store::{COUNTER_KEY, PersistenceMode, RecordStore};
