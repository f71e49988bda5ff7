//! Repository trait for the counter and URL records.

use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable state of the shortener: one global counter plus one record per
/// short code.
///
/// Implementations add no locking of their own. Uniqueness of allocated
/// values and atomicity of click increments come from the backend's atomic
/// primitives, which makes every method safe to call concurrently from any
/// number of service instances.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RecordStore`] - any [`crate::infrastructure::kv::KvBackend`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Atomically increments the global counter and returns the new value.
    ///
    /// Concurrent callers each observe a distinct value; values are never
    /// skipped or reused by the counter itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the backend cannot be reached.
    /// Nothing is persisted in that case.
    async fn allocate_code(&self) -> Result<u64, AppError>;

    /// Creates the record for `code` with zero clicks and the current time.
    ///
    /// An existing record under the same code is overwritten in full.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend errors when the write is
    /// awaited. With best-effort persistence the write is detached and its
    /// errors are only logged.
    async fn create_record(
        &self,
        code: &str,
        short_url: &str,
        long_url: &str,
    ) -> Result<UrlRecord, AppError>;

    /// Loads the record for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if no record exists for the code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend errors and
    /// [`AppError::Internal`] if the stored record is incomplete or corrupt.
    async fn load_record(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically adds one to the click count of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend errors.
    async fn increment_clicks(&self, code: &str) -> Result<(), AppError>;

    /// Reads the counter without changing it. A counter that was never
    /// incremented reads as 0.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend errors.
    async fn current_counter(&self) -> Result<u64, AppError>;

    /// Returns up to `n` most recent records, newest first.
    ///
    /// Looks at the codes of counter values `last, last - 1, ...` down to
    /// `max(last - n + 1, 1)` and skips codes that have no record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend errors.
    async fn latest(&self, n: u64) -> Result<Vec<UrlRecord>, AppError>;

    /// Checks if the backing store is reachable.
    async fn health_check(&self) -> bool;
}
