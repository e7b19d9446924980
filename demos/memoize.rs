//! Memoization demo
//!
//! Caches the result of a slow lookup and shows hits, LRU eviction and TTL expiry.
//! Configure with `CACHE_TTL_MS` / `CACHE_ITEM_LIMIT`, logging with `RUST_LOG`.
//!
//! ```text
//! CACHE_TTL_MS=500 CACHE_ITEM_LIMIT=2 RUST_LOG=lru_ttl_cache=debug cargo run --example memoize
//! ```

use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{Config, LruTtlCache};

/// Blocking stand-in for an expensive computation; runs on the main thread only.
fn slow_square(n: u64) -> u64 {
    thread::sleep(Duration::from_millis(50));
    n * n
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info,memoize=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The sweeper runs on the runtime's worker; cache calls stay on this thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .context("failed to build runtime")?;

    let config = Config::from_env();
    let cache: LruTtlCache<u64> = LruTtlCache::with_handle(config.clone(), runtime.handle())
        .context("failed to build cache")?;

    for n in [2, 3, 2, 4, 2, 3] {
        let key = n.to_string();
        let value = cache.get_or_insert_with(&key, || slow_square(n));
        info!("square({}) = {}", n, value);
    }

    thread::sleep(config.ttl() + Duration::from_millis(10));
    info!("After TTL, has(\"2\") = {}", cache.has("2"));

    let stats = cache.stats();
    info!(
        "hits={} misses={} evictions={} expirations={} hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.expirations,
        stats.hit_rate()
    );

    cache.close();
    Ok(())
}
