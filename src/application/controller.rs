//! Query-state controller.
//!
//! Owns the current query of one list page and turns partial updates into
//! cache fetches. Keyword changes are coalesced behind a quiet period; a
//! newer update aborts the previously scheduled fetch, so a superseded
//! keyword never reaches the network. Page/size/filter changes issue
//! immediately.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use scorta_api_types::RecordPage;

use crate::cache::lock::mutex_lock;
use crate::cache::{QueryCache, QueryKey};
use crate::domain::query::{ListQuery, QueryUpdate};
use crate::domain::resources::ListResource;
use crate::infra::api::ApiClient;
use crate::infra::error::ApiError;

const SOURCE: &str = "application::controller";

pub(crate) struct QueryController<T: ListResource> {
    api: Arc<ApiClient>,
    cache: QueryCache<T>,
    debounce: Duration,
    state: Mutex<ControllerState>,
}

struct ControllerState {
    query: ListQuery,
    /// Debounced fetch scheduled but not yet issued; aborted on supersede.
    scheduled: Option<JoinHandle<()>>,
}

impl<T: ListResource> QueryController<T> {
    pub(crate) fn new(api: Arc<ApiClient>, cache: QueryCache<T>, debounce: Duration) -> Self {
        Self {
            api,
            cache,
            debounce,
            state: Mutex::new(ControllerState {
                query: ListQuery::default(),
                scheduled: None,
            }),
        }
    }

    pub(crate) fn current(&self) -> ListQuery {
        mutex_lock(&self.state, SOURCE, "current").query.clone()
    }

    pub(crate) fn current_key(&self) -> QueryKey {
        QueryKey::new(T::PATH, &self.current())
    }

    /// Merge a partial update and trigger a fetch; never blocks the caller.
    pub(crate) fn on_query(self: Arc<Self>, update: QueryUpdate) {
        let debounced = update.is_keyword_only();
        let mut state = mutex_lock(&self.state, SOURCE, "on_query");
        state.query = state.query.merge(&update);

        // Whatever was scheduled is superseded by this update.
        if let Some(scheduled) = state.scheduled.take() {
            scheduled.abort();
        }

        let controller = Arc::clone(&self);
        if debounced {
            let delay = self.debounce;
            debug!(resource = %T::PATH, delay_ms = delay.as_millis() as u64, "keyword fetch scheduled");
            state.scheduled = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = controller.issue().await;
            }));
        } else {
            tokio::spawn(async move {
                let _ = controller.issue().await;
            });
        }
    }

    /// Fetch the entry for the current query; attaches to an in-flight
    /// request for the same key when one exists.
    pub(crate) async fn issue(&self) -> Result<RecordPage<T>, ApiError> {
        self.issue_query(self.current()).await
    }

    /// Fetch a specific query through the shared cache (used for one-shot
    /// lookups such as option lists).
    pub(crate) async fn issue_query(&self, query: ListQuery) -> Result<RecordPage<T>, ApiError> {
        let query = query.normalized();
        let key = QueryKey::new(T::PATH, &query);
        debug!(key = %key, "issuing query");
        let api = Arc::clone(&self.api);
        self.cache
            .fetch(key, move || async move { api.list::<T>(&query).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::config::ApiSettings;
    use crate::infra::api::StaticToken;
    use scorta_api_types::InventoryRecord;

    fn controller() -> Arc<QueryController<InventoryRecord>> {
        let settings = ApiSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let api = Arc::new(
            ApiClient::new(&settings, Arc::new(StaticToken::new("test-key"))).expect("client"),
        );
        let cache = QueryCache::new(CacheConfig::default());
        Arc::new(QueryController::new(api, cache, Duration::from_millis(300)))
    }

    // The paused clock keeps spawned fetches from running, so these tests
    // observe pure controller state.

    #[tokio::test(start_paused = true)]
    async fn on_query_merges_into_current() {
        let controller = controller();
        Arc::clone(&controller).on_query(QueryUpdate::page(3));
        Arc::clone(&controller).on_query(QueryUpdate::size(25));

        let current = controller.current();
        assert_eq!(current.page, 3);
        assert_eq!(current.size, 25);
    }

    #[tokio::test(start_paused = true)]
    async fn keyword_update_resets_page() {
        let controller = controller();
        Arc::clone(&controller).on_query(QueryUpdate::page(5));
        Arc::clone(&controller).on_query(QueryUpdate::keyword("bolt"));

        let current = controller.current();
        assert_eq!(current.page, 1);
        assert_eq!(current.keyword, "bolt");
    }

    #[tokio::test(start_paused = true)]
    async fn current_key_follows_the_query() {
        let controller = controller();
        let cold = controller.current_key();
        Arc::clone(&controller).on_query(QueryUpdate::keyword("bolt"));
        assert_ne!(controller.current_key(), cold);
    }
}
