//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::RecordRepository;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request (cheap due to `Arc` wrappers).
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn RecordRepository>>,
    pub repository: Arc<dyn RecordRepository>,
    /// Kept for the health check; clicks are sent through `link_service`.
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Redirect target for unknown short codes.
    pub not_found_url: Arc<str>,
}

impl AppState {
    /// Creates application state.
    pub fn new(
        link_service: Arc<LinkService<dyn RecordRepository>>,
        click_sender: mpsc::Sender<ClickEvent>,
        not_found_url: impl Into<Arc<str>>,
    ) -> Self {
        let repository = link_service.repository().clone();
        Self {
            link_service,
            repository,
            click_sender,
            not_found_url: not_found_url.into(),
        }
    }
}
