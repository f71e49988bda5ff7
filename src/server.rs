//! HTTP server initialization and runtime setup.
//!
//! Handles backend connection, worker spawning, and Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::RecordRepository;
use crate::infrastructure::kv::{KvBackend, MemoryBackend, RedisBackend};
use crate::infrastructure::persistence::RecordStore;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::Encoder;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Connects the key-value backend.
///
/// Without a Redis URL the in-memory backend is used and a warning is
/// logged: its state is lost on restart and not shared between instances.
///
/// # Errors
///
/// Returns an error if Redis is configured but unreachable.
pub async fn connect_backend(redis_url: Option<&str>) -> Result<Arc<dyn KvBackend>> {
    match redis_url {
        Some(url) => {
            let redis = RedisBackend::connect(url)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Connected to Redis");
            Ok(Arc::new(redis))
        }
        None => {
            tracing::warn!(
                "Redis is not configured, using in-memory store. Data will not survive a restart"
            );
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}

/// Builds the record store for `config` on top of `backend`.
///
/// # Errors
///
/// Returns an error if the alphabet is invalid.
pub fn build_repository(
    config: &Config,
    backend: Arc<dyn KvBackend>,
) -> Result<(Arc<dyn RecordRepository>, Encoder)> {
    let encoder = Encoder::new(&config.code_alphabet).context("Invalid CODE_ALPHABET")?;
    tracing::info!(
        backend = backend.name(),
        mode = %config.persistence_mode,
        base = encoder.base(),
        "Record store ready"
    );
    let store = RecordStore::new(backend, encoder.clone(), config.persistence_mode);
    Ok((Arc::new(store), encoder))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key-value backend (Redis or in-memory fallback)
/// - Record store and link service
/// - Background click worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backend = connect_backend(config.redis_url.as_deref()).await?;
    let (repository, encoder) = build_repository(&config, backend)?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let worker = tokio::spawn(run_click_worker(
        click_rx,
        repository.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let link_service = Arc::new(LinkService::new(
        repository,
        encoder,
        config.base_url(),
        click_tx.clone(),
    ));
    let state = AppState::new(link_service, click_tx, config.not_found_target());

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last senders; the worker drains what is queued.
    if let Err(e) = worker.await {
        tracing::error!("Click worker panicked: {}", e);
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
