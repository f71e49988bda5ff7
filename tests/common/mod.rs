#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc;
use redis_shortener::application::services::LinkService;
use redis_shortener::domain::click_event::ClickEvent;
use redis_shortener::domain::entities::UrlRecord;
use redis_shortener::domain::repositories::RecordRepository;
use redis_shortener::infrastructure::kv::{KvBackend, MemoryBackend};
use redis_shortener::infrastructure::persistence::{PersistenceMode, RecordStore};
use redis_shortener::state::AppState;
use redis_shortener::utils::code_generator::Encoder;

pub const BASE_URL: &str = "http://s.example.com";
pub const NOT_FOUND_URL: &str = "https://www.google.com";

/// State over a fresh in-memory store.
pub struct TestContext {
    pub state: AppState,
    pub backend: Arc<MemoryBackend>,
    pub repository: Arc<dyn RecordRepository>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with_capacity(100)
}

pub fn create_test_context_with_capacity(capacity: usize) -> TestContext {
    let backend = Arc::new(MemoryBackend::new());
    let kv: Arc<dyn KvBackend> = backend.clone();
    let store = RecordStore::new(kv, Encoder::default(), PersistenceMode::Sync);
    let repository: Arc<dyn RecordRepository> = Arc::new(store);

    let (tx, rx) = mpsc::channel(capacity);

    let link_service = Arc::new(LinkService::new(
        repository.clone(),
        Encoder::default(),
        BASE_URL,
        tx.clone(),
    ));
    let state = AppState::new(link_service, tx, NOT_FOUND_URL);

    TestContext {
        state,
        backend,
        repository,
        click_rx: rx,
    }
}

/// Creates a link through the service, as the shorten endpoint would.
pub async fn create_test_link(state: &AppState, url: &str) -> UrlRecord {
    state.link_service.shorten(url).await.unwrap()
}
