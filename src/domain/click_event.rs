//! Click event model for asynchronous click counting.

/// A resolved short code whose click still has to be counted.
///
/// Sent from [`crate::application::services::LinkService::resolve`] to the
/// background worker over a bounded channel, so the redirect never waits for
/// the counter write.
///
/// # Usage Flow
///
/// 1. Created once the record was loaded
/// 2. Sent to the channel with `try_send` (dropped if the queue is full)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
