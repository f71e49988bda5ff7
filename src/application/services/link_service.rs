//! Link creation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::RecordRepository;
use crate::error::AppError;
use crate::utils::code_generator::{Encoder, is_reserved};
use crate::utils::url_normalizer::{UrlValidationError, validate_url};

/// Number of records returned by [`LinkService::latest`] when the caller
/// gives no valid count.
pub const DEFAULT_LATEST_COUNT: u64 = 10;

/// Service for creating and retrieving shortened links.
///
/// Short codes are derived from the repository's global counter, so creation
/// never has to check for collisions. Clicks on resolved links are handed to
/// the background worker through `click_sender` and never awaited.
pub struct LinkService<R: RecordRepository + ?Sized> {
    repository: Arc<R>,
    encoder: Encoder,
    base_url: String,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl<R: RecordRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built on, e.g.
    /// `http://s.example.com`.
    pub fn new(
        repository: Arc<R>,
        encoder: Encoder,
        base_url: impl Into<String>,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            repository,
            encoder,
            base_url: base_url.into(),
            click_sender,
        }
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Shortens `raw_url`.
    ///
    /// Validates the URL, allocates the next counter value, encodes it and
    /// stores a fresh record. Counter values whose code is reserved for a
    /// fixed route are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or malformed.
    /// Returns [`AppError::Unavailable`] if the backend fails; no record is
    /// stored in that case.
    pub async fn shorten(&self, raw_url: &str) -> Result<UrlRecord, AppError> {
        let long_url = validate_url(raw_url).map_err(|e| {
            let message = match e {
                UrlValidationError::Empty => "URL must not be empty",
                _ => "Invalid URL format",
            };
            AppError::bad_request(message, json!({ "reason": e.to_string() }))
        })?;

        let code = loop {
            let value = self.repository.allocate_code().await?;
            let code = self.encoder.encode(value);
            if !is_reserved(&code) {
                break code;
            }
            debug!(code = %code, value, "Skipping reserved code");
        };

        let short_url = self.short_url(&code);
        let record = self
            .repository
            .create_record(&code, &short_url, &long_url)
            .await?;

        info!(code = %record.key, long_url = %record.long_url, "Link shortened");
        Ok(record)
    }

    /// Resolves `code` to its long URL and records a click.
    ///
    /// The click is queued with `try_send`; when the queue is full or closed
    /// the click is dropped and the redirect still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists.
    /// Returns [`AppError::Unavailable`] on backend errors.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let record = self.info(code).await?;

        if let Err(e) = self.click_sender.try_send(ClickEvent::new(code)) {
            warn!(code = %code, error = %e, "Click dropped");
        }

        debug!(code = %code, long_url = %record.long_url, "Resolved");
        Ok(record.long_url)
    }

    /// Retrieves the record for `code` without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists.
    /// Returns [`AppError::Unavailable`] on backend errors.
    pub async fn info(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .load_record(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Returns the most recent records, newest first.
    ///
    /// `raw_count` is parsed as a non-negative integer; anything else
    /// (including `None`) means [`DEFAULT_LATEST_COUNT`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on backend errors.
    pub async fn latest(&self, raw_count: Option<&str>) -> Result<Vec<UrlRecord>, AppError> {
        self.repository.latest(parse_latest_count(raw_count)).await
    }

    /// Constructs the full short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

/// Parses the `latest` count, falling back to [`DEFAULT_LATEST_COUNT`].
pub fn parse_latest_count(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_LATEST_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRecordRepository;
    use mockall::Sequence;

    fn test_record(key: &str, long_url: &str) -> UrlRecord {
        UrlRecord {
            key: key.to_string(),
            short_url: format!("http://s.example.com/{}", key),
            long_url: long_url.to_string(),
            creation_date: 1,
            clicks: 0,
        }
    }

    fn service(repo: MockRecordRepository) -> LinkService<MockRecordRepository> {
        service_with_queue(repo, 16).0
    }

    fn service_with_queue(
        repo: MockRecordRepository,
        capacity: usize,
    ) -> (LinkService<MockRecordRepository>, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        let service = LinkService::new(
            Arc::new(repo),
            Encoder::default(),
            "http://s.example.com/",
            tx,
        );
        (service, rx)
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut repo = MockRecordRepository::new();
        repo.expect_allocate_code().times(1).returning(|| Ok(62));
        repo.expect_create_record()
            .withf(|code, short_url, long_url| {
                code == "10"
                    && short_url == "http://s.example.com/10"
                    && long_url == "http://example.com/x"
            })
            .times(1)
            .returning(|code, _, long_url| Ok(test_record(code, long_url)));

        let record = service(repo).shorten("example.com/x").await.unwrap();

        assert_eq!(record.key, "10");
        assert_eq!(record.long_url, "http://example.com/x");
    }

    #[tokio::test]
    async fn test_shorten_empty_url() {
        let mut repo = MockRecordRepository::new();
        repo.expect_allocate_code().times(0);

        let err = service(repo).shorten("").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "URL must not be empty");
    }

    #[tokio::test]
    async fn test_shorten_malformed_url() {
        let mut repo = MockRecordRepository::new();
        repo.expect_allocate_code().times(0);

        let err = service(repo).shorten("http://").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Invalid URL format");
    }

    #[tokio::test]
    async fn test_shorten_backend_unavailable() {
        let mut repo = MockRecordRepository::new();
        repo.expect_allocate_code()
            .times(1)
            .returning(|| Err(AppError::unavailable("down", json!({}))));
        repo.expect_create_record().times(0);

        let err = service(repo).shorten("http://example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_shorten_skips_reserved_code() {
        let encoder = Encoder::default();
        let reserved = encoder.decode("latest").unwrap();

        let mut seq = Sequence::new();
        let mut repo = MockRecordRepository::new();
        repo.expect_allocate_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(reserved));
        repo.expect_allocate_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(reserved + 1));
        repo.expect_create_record()
            .withf(|code, _, _| code == "latesu")
            .times(1)
            .returning(|code, _, long_url| Ok(test_record(code, long_url)));

        let record = service(repo).shorten("http://example.com").await.unwrap();
        assert_eq!(record.key, "latesu");
    }

    #[tokio::test]
    async fn test_info_found() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_record()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|code| Ok(Some(test_record(code, "http://example.com"))));

        let (service, mut rx) = service_with_queue(repo, 16);
        let record = service.info("abc").await.unwrap();

        assert_eq!(record.long_url, "http://example.com");
        assert!(rx.try_recv().is_err(), "info must not count a click");
    }

    #[tokio::test]
    async fn test_info_not_found() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_record().times(1).returning(|_| Ok(None));

        let err = service(repo).info("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_enqueues_click() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_record()
            .times(1)
            .returning(|code| Ok(Some(test_record(code, "http://example.com/t"))));

        let (service, mut rx) = service_with_queue(repo, 16);
        let long_url = service.resolve("abc").await.unwrap();

        assert_eq!(long_url, "http://example.com/t");
        assert_eq!(rx.try_recv().unwrap().code, "abc");
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_queue_full() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_record()
            .times(2)
            .returning(|code| Ok(Some(test_record(code, "http://example.com"))));

        let (service, mut rx) = service_with_queue(repo, 1);
        service.resolve("a").await.unwrap();
        service.resolve("b").await.unwrap();

        assert_eq!(rx.try_recv().unwrap().code, "a");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_unknown_does_not_enqueue() {
        let mut repo = MockRecordRepository::new();
        repo.expect_load_record().times(1).returning(|_| Ok(None));

        let (service, mut rx) = service_with_queue(repo, 16);
        let err = service.resolve("nope").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_latest_uses_parsed_count() {
        let mut repo = MockRecordRepository::new();
        repo.expect_latest()
            .withf(|n| *n == 3)
            .times(1)
            .returning(|_| Ok(vec![]));

        assert!(service(repo).latest(Some("3")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_defaults_on_invalid_count() {
        let mut repo = MockRecordRepository::new();
        repo.expect_latest()
            .withf(|n| *n == DEFAULT_LATEST_COUNT)
            .times(1)
            .returning(|_| Ok(vec![]));

        service(repo).latest(Some("ten")).await.unwrap();
    }

    #[test]
    fn test_parse_latest_count() {
        assert_eq!(parse_latest_count(None), 10);
        assert_eq!(parse_latest_count(Some("0")), 0);
        assert_eq!(parse_latest_count(Some("25")), 25);
        assert_eq!(parse_latest_count(Some("-3")), 10);
        assert_eq!(parse_latest_count(Some("abc")), 10);
        assert_eq!(parse_latest_count(Some("")), 10);
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = service(MockRecordRepository::new());
        assert_eq!(service.short_url("1c"), "http://s.example.com/1c");
    }
}
