//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// The task sleeps for `interval` between sweeps and takes the store lock only
/// for the duration of one [`CacheStore::cleanup_expired`] pass. It holds a weak
/// reference, so it never keeps the store alive on its own.
///
/// The task exits when `cancel` is triggered or once the store has been dropped.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Mutex::new(CacheStore::<String>::new(ttl, 1000)));
/// let cancel = CancellationToken::new();
/// let handle = spawn_cleanup_task(&Handle::current(), &cache, ttl, cancel.clone());
/// // Later, on disposal:
/// cancel.cancel();
/// ```
pub fn spawn_cleanup_task<V>(
    runtime: &Handle,
    cache: &Arc<Mutex<CacheStore<V>>>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    V: Send + 'static,
{
    let cache = Arc::downgrade(cache);
    runtime.spawn(run_cleanup_loop(cache, interval, cancel))
}

async fn run_cleanup_loop<V>(
    cache: Weak<Mutex<CacheStore<V>>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    info!(
        "Starting TTL cleanup task with interval of {} ms",
        interval.as_millis()
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("TTL cleanup task cancelled");
                return;
            }
            _ = tokio::time::sleep(interval) => {}
        }

        let Some(store) = cache.upgrade() else {
            debug!("Cache dropped, stopping TTL cleanup task");
            return;
        };
        let removed = store.lock().cleanup_expired();

        if removed > 0 {
            info!("TTL cleanup: removed {} expired entries", removed);
        } else {
            debug!("TTL cleanup: no expired entries found");
        }
    }
}
