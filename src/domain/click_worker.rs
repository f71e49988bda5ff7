//! Background worker applying click increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::RecordRepository;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// Up to `concurrency` increments run at once. Each one is retried with
/// exponential backoff; a click that still fails is logged and dropped, the
/// request that produced it has long been answered. Returns once the channel
/// is closed and all in-flight increments have finished.
pub async fn run_click_worker<R>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: RecordRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tokio::spawn(async move {
            let _permit = permit;
            count_click(repository.as_ref(), &event).await;
        });
    }

    // Wait for in-flight increments.
    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}

async fn count_click<R>(repository: &R, event: &ClickEvent)
where
    R: RecordRepository + ?Sized,
{
    let mut delays = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_millis(500))
        .take(MAX_RETRIES);

    loop {
        match repository.increment_clicks(&event.code).await {
            Ok(()) => {
                debug!(code = %event.code, "Click recorded");
                return;
            }
            Err(e) => match delays.next() {
                Some(delay) => {
                    debug!(code = %event.code, error = %e, ?delay, "Retrying click");
                    tokio::time::sleep(delay).await;
                }
                None => {
                    warn!(code = %event.code, error = %e, "Dropping click after retries");
                    return;
                }
            },
        }
    }
}
