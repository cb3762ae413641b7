//! Resource handles: the surface every list page shares.
//!
//! A handle composes the query-state controller, the shared cache, and the
//! mutation coordinator for one resource. Handles are cheap to create; all
//! handles for a resource observe the same cache, so two visible pages of
//! the same resource share entries and de-duplicate their requests.

use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use scorta_api_types::RecordPage;

use crate::cache::{CacheConfig, EntrySnapshot, QueryCache};
use crate::domain::query::{ListQuery, QueryUpdate};
use crate::domain::resources::ListResource;
use crate::infra::api::ApiClient;
use crate::infra::error::ApiError;

use super::controller::QueryController;
use super::mutation::MutationCoordinator;

/// Page size used for one-shot option lookups (select boxes).
const OPTIONS_PAGE_SIZE: u32 = 100;

/// Snapshot of a list page's observable state.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Current page, or the previous one while a revalidation runs.
    pub data: Option<RecordPage<T>>,
    /// Cold start with nothing to show; drives skeleton rendering.
    pub loading: bool,
    /// Any fetch in flight; drives the lightweight spinner.
    pub is_validating: bool,
    pub delete_loading: bool,
    pub error: Option<ApiError>,
}

impl<T: Clone> ResourceState<T> {
    fn from_snapshot(snapshot: Option<EntrySnapshot<T>>, delete_loading: bool) -> Self {
        match snapshot {
            Some(snapshot) => Self {
                loading: snapshot.loading(),
                is_validating: snapshot.is_validating(),
                data: snapshot.data,
                error: snapshot.error,
                delete_loading,
            },
            None => Self {
                data: None,
                loading: false,
                is_validating: false,
                delete_loading,
                error: None,
            },
        }
    }
}

/// Handle to one list resource.
pub struct ResourceHandle<T: ListResource> {
    controller: Arc<QueryController<T>>,
    cache: QueryCache<T>,
    mutations: MutationCoordinator<T>,
    delete_loading: watch::Sender<bool>,
}

impl<T: ListResource> ResourceHandle<T> {
    pub(crate) fn new(api: Arc<ApiClient>, cache: QueryCache<T>, config: &CacheConfig) -> Self {
        let controller = Arc::new(QueryController::new(
            Arc::clone(&api),
            cache.clone(),
            config.debounce(),
        ));
        let mutations = MutationCoordinator::new(api, cache.clone());
        let (delete_loading, _) = watch::channel(false);
        Self {
            controller,
            cache,
            mutations,
            delete_loading,
        }
    }

    /// Merge a partial update into the current query and trigger a fetch.
    /// Keyword-only updates are debounced; everything else issues now.
    pub fn on_query(&self, update: QueryUpdate) {
        Arc::clone(&self.controller).on_query(update);
    }

    pub fn current(&self) -> ListQuery {
        self.controller.current()
    }

    /// Observable state for the current query.
    pub fn state(&self) -> ResourceState<T> {
        let snapshot = self.cache.snapshot(&self.controller.current_key());
        ResourceState::from_snapshot(snapshot, *self.delete_loading.borrow())
    }

    /// Await the page for the current query. Attaches to an in-flight
    /// request when one exists, so combining this with `on_query` does not
    /// duplicate network calls.
    pub async fn resolve(&self) -> Result<RecordPage<T>, ApiError> {
        self.controller.issue().await
    }

    /// Watch status/data transitions of the current query's entry. The
    /// stream is bound to the key at call time; resubscribe after changing
    /// the query.
    pub fn subscribe(&self) -> watch::Receiver<EntrySnapshot<T>> {
        self.cache.subscribe(&self.controller.current_key())
    }

    /// Resolve an explicit query one-shot, without touching the page's
    /// current query state. Cached and de-duplicated like any other fetch.
    pub async fn query(&self, query: ListQuery) -> Result<RecordPage<T>, ApiError> {
        self.controller.issue_query(query).await
    }

    /// One-shot option list (page 1, large size, no keyword), cached like
    /// any other query.
    pub async fn options(&self) -> Result<RecordPage<T>, ApiError> {
        self.query(ListQuery::new(1, OPTIONS_PAGE_SIZE)).await
    }

    /// Delete a record and invalidate every cached query of this resource.
    /// `delete_loading` is observable for the duration of the call.
    pub async fn on_delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_loading.send_replace(true);
        let result = self.mutations.delete(id).await;
        self.delete_loading.send_replace(false);
        result.map(|_| ())
    }

    pub async fn create(&self, payload: &T::Payload) -> Result<Option<T>, ApiError> {
        self.mutations.create(payload).await
    }

    pub async fn update(&self, id: Uuid, payload: &T::Payload) -> Result<Option<T>, ApiError> {
        self.mutations.update(id, payload).await
    }

    pub fn delete_loading(&self) -> bool {
        *self.delete_loading.borrow()
    }
}
