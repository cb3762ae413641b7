//! Query cache storage with stale-while-revalidate semantics.
//!
//! One entry per [`QueryKey`], owned exclusively by the store: observers get
//! snapshots and watch channels, never entry references. Concurrent fetches
//! for the same key attach to one shared in-flight future, so a key never
//! has more than one request on the wire. Invalidation marks entries stale
//! without deleting them; the previous page keeps rendering until the
//! revalidation lands, which is what keeps tables from flickering to empty
//! on delete.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use lru::LruCache;
use metrics::counter;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

use scorta_api_types::RecordPage;

use crate::infra::error::ApiError;

use super::config::CacheConfig;
use super::keys::QueryKey;
use super::lock::mutex_lock;

const SOURCE: &str = "cache::store";

const METRIC_HIT: &str = "scorta_cache_hit_total";
const METRIC_STALE_HIT: &str = "scorta_cache_stale_hit_total";
const METRIC_MISS: &str = "scorta_cache_miss_total";
const METRIC_DEDUP: &str = "scorta_cache_dedup_total";
const METRIC_EVICT: &str = "scorta_cache_evict_total";
const METRIC_INVALIDATE: &str = "scorta_cache_invalidate_total";

type SharedFetch<T> = Shared<BoxFuture<'static, Result<RecordPage<T>, ApiError>>>;

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Created (e.g. by a subscription) but never fetched.
    Idle,
    /// First fetch for this key, no previous data to show.
    Loading,
    /// Fetch in flight while the previous data stays visible.
    Revalidating,
    Ready,
    Error,
}

/// Observable state of one cache entry.
#[derive(Debug, Clone)]
pub struct EntrySnapshot<T> {
    pub status: EntryStatus,
    pub data: Option<RecordPage<T>>,
    pub error: Option<ApiError>,
    pub stale: bool,
    pub fetched_at: Option<Instant>,
}

impl<T> EntrySnapshot<T> {
    fn idle() -> Self {
        Self {
            status: EntryStatus::Idle,
            data: None,
            error: None,
            stale: false,
            fetched_at: None,
        }
    }

    /// Cold start: a fetch is running and there is nothing to show yet.
    pub fn loading(&self) -> bool {
        matches!(self.status, EntryStatus::Loading)
    }

    /// Any fetch in flight, cold or warm.
    pub fn is_validating(&self) -> bool {
        matches!(self.status, EntryStatus::Loading | EntryStatus::Revalidating)
    }
}

struct CacheEntry<T: Clone> {
    snapshot: EntrySnapshot<T>,
    inflight: Option<SharedFetch<T>>,
    tx: watch::Sender<EntrySnapshot<T>>,
}

impl<T: Clone> CacheEntry<T> {
    fn new() -> Self {
        let snapshot = EntrySnapshot::idle();
        let (tx, _rx) = watch::channel(snapshot.clone());
        Self {
            snapshot,
            inflight: None,
            tx,
        }
    }

    /// Data servable without a network call: Ready, not stale, within TTL.
    fn fresh_data(&self, ttl: Option<Duration>) -> Option<RecordPage<T>> {
        if self.snapshot.status != EntryStatus::Ready || self.snapshot.stale {
            return None;
        }
        if let (Some(ttl), Some(fetched_at)) = (ttl, self.snapshot.fetched_at) {
            if fetched_at.elapsed() > ttl {
                return None;
            }
        }
        self.snapshot.data.clone()
    }

    fn begin(&mut self, inflight: SharedFetch<T>) {
        self.snapshot.status = if self.snapshot.data.is_some() {
            EntryStatus::Revalidating
        } else {
            EntryStatus::Loading
        };
        self.snapshot.error = None;
        self.inflight = Some(inflight);
        self.publish();
    }

    fn publish(&self) {
        self.tx.send_replace(self.snapshot.clone());
    }
}

struct Inner<T: Clone> {
    config: CacheConfig,
    entries: Mutex<LruCache<QueryKey, CacheEntry<T>>>,
}

impl<T: Clone> Inner<T> {
    /// Writes the completed result into the entry. Runs exactly once per
    /// in-flight request, inside the shared future all callers await.
    fn complete(inner: &Arc<Self>, key: &QueryKey, result: Result<RecordPage<T>, ApiError>) {
        let mut entries = mutex_lock(&inner.entries, SOURCE, "complete");
        let entry = ensure_entry(&mut entries, key);
        entry.inflight = None;
        match result {
            Ok(page) => {
                entry.snapshot.status = EntryStatus::Ready;
                entry.snapshot.data = Some(page);
                entry.snapshot.error = None;
                entry.snapshot.stale = false;
                entry.snapshot.fetched_at = Some(Instant::now());
            }
            Err(error) => {
                entry.snapshot.status = EntryStatus::Error;
                // Keep the previous page visible behind the error, except
                // when the session itself is gone.
                if error.is_unauthorized() {
                    entry.snapshot.data = None;
                }
                entry.snapshot.error = Some(error);
            }
        }
        entry.publish();
        debug!(key = %key, status = ?entry.snapshot.status, "Cache entry updated");
    }
}

/// Get-or-create the entry for a key, evicting the least recently used one
/// when the capacity bound is hit. The entry for an in-flight key may be
/// evicted; `complete` reinserts it so the result stays reusable.
fn ensure_entry<'a, T: Clone>(
    entries: &'a mut LruCache<QueryKey, CacheEntry<T>>,
    key: &QueryKey,
) -> &'a mut CacheEntry<T> {
    if !entries.contains(key) {
        if let Some((evicted, _)) = entries.push(key.clone(), CacheEntry::new()) {
            counter!(METRIC_EVICT).increment(1);
            debug!(evicted_key = %evicted, "Cache entry evicted");
        }
    }
    entries
        .get_mut(key)
        .expect("entry exists after ensure_entry insert")
}

/// Shared query cache for one resource path.
///
/// Cloning is cheap and shares the underlying entries, so every handle for a
/// resource observes the same cache.
pub struct QueryCache<T: Clone> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone> Clone for QueryCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> QueryCache<T> {
    pub fn new(config: CacheConfig) -> Self {
        let capacity = config.entry_limit_non_zero();
        Self {
            inner: Arc::new(Inner {
                config,
                entries: Mutex::new(LruCache::new(capacity)),
            }),
        }
    }

    /// Pure read of an entry's current state; does not touch LRU order.
    pub fn snapshot(&self, key: &QueryKey) -> Option<EntrySnapshot<T>> {
        mutex_lock(&self.inner.entries, SOURCE, "snapshot")
            .peek(key)
            .map(|entry| entry.snapshot.clone())
    }

    /// Observe every status/data transition of a key. Dropping the receiver
    /// unsubscribes; a result arriving afterwards is still cached but
    /// notifies nobody.
    pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<EntrySnapshot<T>> {
        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "subscribe");
        ensure_entry(&mut entries, key).tx.subscribe()
    }

    /// Resolve a key to a page, going to the network at most once.
    ///
    /// Fresh entry → cached data, no call. In-flight entry → attach to the
    /// existing request. Otherwise run `loader` (Loading when cold,
    /// Revalidating when stale data exists) and store the outcome; failures
    /// keep the previous data visible for stale-while-revalidate display.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, loader: F) -> Result<RecordPage<T>, ApiError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<RecordPage<T>, ApiError>> + Send + 'static,
    {
        let shared = {
            let mut entries = mutex_lock(&self.inner.entries, SOURCE, "fetch");
            let ttl = self.inner.config.ttl();
            let entry = ensure_entry(&mut entries, &key);

            if let Some(inflight) = entry.inflight.clone() {
                counter!(METRIC_DEDUP).increment(1);
                inflight
            } else if let Some(data) = entry.fresh_data(ttl) {
                counter!(METRIC_HIT).increment(1);
                return Ok(data);
            } else {
                if entry.snapshot.data.is_some() {
                    counter!(METRIC_STALE_HIT).increment(1);
                } else {
                    counter!(METRIC_MISS).increment(1);
                }
                let inner = Arc::clone(&self.inner);
                let completed_key = key.clone();
                let shared: SharedFetch<T> = async move {
                    let result = loader().await;
                    Inner::complete(&inner, &completed_key, result.clone());
                    result
                }
                .boxed()
                .shared();
                entry.begin(shared.clone());
                shared
            }
        };

        shared.await
    }

    /// Mark matching entries stale without deleting them. Returns the number
    /// of entries marked.
    pub fn invalidate<P>(&self, predicate: P) -> usize
    where
        P: Fn(&QueryKey) -> bool,
    {
        let mut entries = mutex_lock(&self.inner.entries, SOURCE, "invalidate");
        let mut marked = 0;
        for (key, entry) in entries.iter_mut() {
            if predicate(key) {
                entry.snapshot.stale = true;
                entry.publish();
                marked += 1;
            }
        }
        drop(entries);
        if marked > 0 {
            counter!(METRIC_INVALIDATE).increment(marked as u64);
            debug!(marked, "Cache entries marked stale");
        }
        marked
    }

    /// Mark every entry stale; used after a mutation on the resource path.
    pub fn invalidate_all(&self) -> usize {
        self.invalidate(|_| true)
    }

    pub fn len(&self) -> usize {
        mutex_lock(&self.inner.entries, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
