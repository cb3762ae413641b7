//! Counter coverage for the query cache, recorded through a local
//! debugging recorder.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serial_test::serial;
use tokio::sync::Notify;
use tokio::task::yield_now;

use scorta::cache::{CacheConfig, QueryCache, QueryKey};
use scorta::domain::query::ListQuery;
use scorta::domain::resources::ResourcePath;
use scorta_api_types::RecordPage;

fn key_for(page: u32) -> QueryKey {
    QueryKey::new(ResourcePath::Inventories, &ListQuery::new(page, 10))
}

fn page_of(records: Vec<u32>) -> RecordPage<u32> {
    let len = records.len() as u64;
    RecordPage {
        records,
        total: len,
        page: 1,
        size: 10,
    }
}

// A DebuggingRecorder snapshot resets every counter to zero, so it can only
// be taken once per run. Capture all counters in a single snapshot up front,
// then read individual values from the resulting map.
fn counters(recorder: &DebuggingRecorder) -> HashMap<String, u64> {
    recorder
        .snapshotter()
        .snapshot()
        .into_vec()
        .into_iter()
        .filter_map(|(key, _, _, value)| match value {
            DebugValue::Counter(count) => Some((key.key().name().to_string(), count)),
            _ => None,
        })
        .collect()
}

fn counter_value(counters: &HashMap<String, u64>, name: &str) -> u64 {
    counters.get(name).copied().unwrap_or(0)
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}

#[test]
#[serial]
fn counters_track_miss_hit_and_stale_hit() {
    let recorder = DebuggingRecorder::new();
    metrics::with_local_recorder(&recorder, || {
        run(async {
            let cache = QueryCache::new(CacheConfig::default());

            cache
                .fetch(key_for(1), || async { Ok(page_of(vec![1])) }.boxed())
                .await
                .expect("cold fetch");
            cache
                .fetch(key_for(1), || async { Ok(page_of(vec![2])) }.boxed())
                .await
                .expect("warm fetch");

            cache.invalidate_all();
            cache
                .fetch(key_for(1), || async { Ok(page_of(vec![3])) }.boxed())
                .await
                .expect("revalidation");
        });
    });

    let counters = counters(&recorder);
    assert_eq!(counter_value(&counters, "scorta_cache_miss_total"), 1);
    assert_eq!(counter_value(&counters, "scorta_cache_hit_total"), 1);
    assert_eq!(counter_value(&counters, "scorta_cache_stale_hit_total"), 1);
    assert_eq!(counter_value(&counters, "scorta_cache_invalidate_total"), 1);
}

#[test]
#[serial]
fn counters_track_deduplicated_fetches() {
    let recorder = DebuggingRecorder::new();
    metrics::with_local_recorder(&recorder, || {
        run(async {
            let cache = QueryCache::new(CacheConfig::default());
            let gate = Arc::new(Notify::new());

            let slow = cache.fetch(key_for(1), {
                let gate = Arc::clone(&gate);
                move || {
                    async move {
                        gate.notified().await;
                        Ok(page_of(vec![1]))
                    }
                    .boxed()
                }
            });
            let attached = cache.fetch(key_for(1), || async { Ok(page_of(vec![2])) }.boxed());
            let release = async {
                for _ in 0..8 {
                    yield_now().await;
                }
                gate.notify_one();
            };

            let (a, b, ()) = tokio::join!(slow, attached, release);
            a.expect("slow fetch");
            b.expect("attached fetch");
        });
    });

    let counters = counters(&recorder);
    assert_eq!(counter_value(&counters, "scorta_cache_dedup_total"), 1);
    assert_eq!(counter_value(&counters, "scorta_cache_miss_total"), 1);
}

#[test]
#[serial]
fn counters_track_capacity_evictions() {
    let recorder = DebuggingRecorder::new();
    metrics::with_local_recorder(&recorder, || {
        run(async {
            let cache = QueryCache::new(CacheConfig {
                entry_limit: 1,
                ..Default::default()
            });

            cache
                .fetch(key_for(1), || async { Ok(page_of(vec![1])) }.boxed())
                .await
                .expect("first key");
            cache
                .fetch(key_for(2), || async { Ok(page_of(vec![2])) }.boxed())
                .await
                .expect("second key");
        });
    });

    let counters = counters(&recorder);
    assert_eq!(counter_value(&counters, "scorta_cache_evict_total"), 1);
}
