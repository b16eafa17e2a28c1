//! Time-boxed memo of the last market snapshot.
//!
//! The whole snapshot is either fresh and served as-is, or stale and replaced by
//! a new fetch cycle. There is no per-record invalidation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::market_data::adapters::{FetchError, MarketSource};
use crate::market_data::fetcher::{fetch_snapshot, PagePlan};
use crate::market_data::types::MarketSnapshot;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// `fetched_at` is fresh strictly before `window` has elapsed.
pub fn is_fresh(now: Instant, fetched_at: Instant, window: Duration) -> bool {
    now.saturating_duration_since(fetched_at) < window
}

struct CacheEntry {
    snapshot: Arc<MarketSnapshot>,
    fetched_at: Instant,
}

/// A snapshot handed out by the cache, with how old it is.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub snapshot: Arc<MarketSnapshot>,
    pub age: Duration,
}

pub struct SnapshotCache {
    source: Arc<dyn MarketSource>,
    clock: Arc<dyn Clock>,
    plan: PagePlan,
    ttl: Duration,
    // Held across the upstream fetch so concurrent callers wait for one refresh.
    entry: Mutex<Option<CacheEntry>>,
}

impl SnapshotCache {
    pub fn new(source: Arc<dyn MarketSource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn MarketSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            plan: PagePlan::default(),
            ttl,
            entry: Mutex::new(None),
        }
    }

    pub fn with_plan(mut self, plan: PagePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the stored snapshot if fresh, otherwise run a fetch cycle and store it.
    ///
    /// A failed cycle leaves the previous entry untouched and is not remembered,
    /// so the next call tries the upstream again.
    pub async fn get(&self) -> Result<CachedSnapshot, FetchError> {
        let mut entry = self.entry.lock().await;
        let now = self.clock.now();

        if let Some(cached) = entry.as_ref() {
            if is_fresh(now, cached.fetched_at, self.ttl) {
                metrics::counter!("kripto_cache_hits_total").increment(1);
                debug!(records = cached.snapshot.len(), "snapshot cache hit");
                return Ok(CachedSnapshot {
                    snapshot: Arc::clone(&cached.snapshot),
                    age: now.saturating_duration_since(cached.fetched_at),
                });
            }
            debug!("snapshot cache stale");
        }

        metrics::counter!("kripto_cache_misses_total").increment(1);
        let snapshot = Arc::new(fetch_snapshot(self.source.as_ref(), self.plan).await?);
        // stamp after the cycle so a slow fetch does not eat into the window
        let fetched_at = self.clock.now();
        info!(records = snapshot.len(), ttl_secs = self.ttl.as_secs(), "snapshot cache refreshed");

        *entry = Some(CacheEntry { snapshot: Arc::clone(&snapshot), fetched_at });
        Ok(CachedSnapshot { snapshot, age: Duration::ZERO })
    }

    #[cfg(test)]
    async fn stored(&self) -> Option<Arc<MarketSnapshot>> {
        self.entry.lock().await.as_ref().map(|e| Arc::clone(&e.snapshot))
    }

    /// Drop the stored snapshot; the next `get` fetches.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::fetcher::tests::PagedSource;
    use crate::market_data::types::MarketRecord;
    use parking_lot::Mutex as SyncMutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct ManualClock {
        now: SyncMutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self { now: SyncMutex::new(Instant::now()) })
        }

        fn advance(&self, by: Duration) {
            *self.now.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }

    fn small_plan() -> PagePlan {
        PagePlan { per_page: 3, max_pages: 4 }
    }

    fn cache_over(source: Arc<PagedSource>, clock: Arc<ManualClock>) -> SnapshotCache {
        SnapshotCache::with_clock(source, DEFAULT_TTL, clock).with_plan(small_plan())
    }

    #[test]
    fn test_is_fresh_boundary() {
        let t0 = Instant::now();
        let window = Duration::from_secs(300);
        assert!(is_fresh(t0, t0, window));
        assert!(is_fresh(t0 + Duration::from_secs(299), t0, window));
        assert!(!is_fresh(t0 + window, t0, window));
        assert!(!is_fresh(t0 + Duration::from_secs(301), t0, window));
    }

    #[tokio::test]
    async fn test_hit_within_window_fetches_once() {
        let source = Arc::new(PagedSource::new(1));
        let clock = ManualClock::new();
        let cache = cache_over(Arc::clone(&source), Arc::clone(&clock));

        let first = cache.get().await.unwrap();
        clock.advance(Duration::from_secs(299));
        let second = cache.get().await.unwrap();

        assert!(Arc::ptr_eq(&first.snapshot, &second.snapshot));
        assert_eq!(second.age, Duration::from_secs(299));
        // one cycle = page 1 (full) + page 2 (empty)
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn test_refetch_after_window() {
        let source = Arc::new(PagedSource::new(1));
        let clock = ManualClock::new();
        let cache = cache_over(Arc::clone(&source), Arc::clone(&clock));

        let first = cache.get().await.unwrap();
        clock.advance(DEFAULT_TTL);
        let second = cache.get().await.unwrap();

        assert!(!Arc::ptr_eq(&first.snapshot, &second.snapshot));
        assert_eq!(second.age, Duration::ZERO);
        assert_eq!(source.call_count(), 4);
    }

    #[tokio::test]
    async fn test_invalidate_forces_fetch() {
        let source = Arc::new(PagedSource::new(1));
        let cache = cache_over(Arc::clone(&source), ManualClock::new());

        cache.get().await.unwrap();
        cache.invalidate().await;
        cache.get().await.unwrap();
        assert_eq!(source.call_count(), 4);
    }

    struct FlakySource {
        fail: AtomicBool,
    }

    #[async_trait::async_trait]
    impl MarketSource for FlakySource {
        async fn fetch_page(&self, page: u32, _per_page: u32) -> Result<Vec<MarketRecord>, FetchError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(FetchError::Network { page, message: "connection reset".into() });
            }
            if page > 1 {
                return Ok(Vec::new());
            }
            Ok(vec![crate::market_data::fetcher::tests::record("Bitcoin", 65000.0)])
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_is_not_cached() {
        let source = Arc::new(FlakySource { fail: AtomicBool::new(true) });
        let clock = ManualClock::new();
        let cache = SnapshotCache::with_clock(source.clone(), DEFAULT_TTL, clock.clone())
            .with_plan(small_plan());

        assert!(cache.get().await.is_err());
        assert!(cache.stored().await.is_none());

        source.fail.store(false, Ordering::SeqCst);
        let ok = cache.get().await.unwrap();
        assert_eq!(ok.snapshot.len(), 1);

        // stale + failing upstream: error surfaces, old entry stays stored
        clock.advance(DEFAULT_TTL);
        source.fail.store(true, Ordering::SeqCst);
        assert!(cache.get().await.is_err());
        let kept = cache.stored().await.expect("entry dropped after failed refresh");
        assert!(Arc::ptr_eq(&kept, &ok.snapshot));

        // upstream back: the stale entry is replaced
        source.fail.store(false, Ordering::SeqCst);
        let fresh = cache.get().await.unwrap();
        assert!(!Arc::ptr_eq(&fresh.snapshot, &ok.snapshot));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_gets_share_one_cycle() {
        let source = Arc::new(PagedSource::new(1));
        let cache = Arc::new(cache_over(Arc::clone(&source), ManualClock::new()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get().await.unwrap().snapshot })
            })
            .collect();

        let mut snapshots = Vec::with_capacity(handles.len());
        for h in handles {
            snapshots.push(h.await.unwrap());
        }

        // one cycle = page 1 (full) + page 2 (empty)
        assert_eq!(source.call_count(), 2);
        assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
        assert_eq!(snapshots[0].len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_gets_on_stale_entry_refresh_once() {
        let source = Arc::new(PagedSource::new(1));
        let clock = ManualClock::new();
        let cache = Arc::new(cache_over(Arc::clone(&source), Arc::clone(&clock)));

        let old = cache.get().await.unwrap().snapshot;
        clock.advance(DEFAULT_TTL);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.get().await.unwrap().snapshot })
            })
            .collect();

        let mut snapshots = Vec::with_capacity(handles.len());
        for h in handles {
            snapshots.push(h.await.unwrap());
        }

        assert_eq!(source.call_count(), 4);
        assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
        assert!(!Arc::ptr_eq(&snapshots[0], &old));
    }
}
