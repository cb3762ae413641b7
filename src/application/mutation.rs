//! Mutation coordinator.
//!
//! One network call per operation, no automatic retry (mutations are not
//! assumed safe to replay). A successful mutation marks every cached query
//! under the resource's path stale, since a create/update/delete can shift
//! which records fall inside any cached page boundary. Failures leave the
//! cache untouched and surface to the caller.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::cache::QueryCache;
use crate::domain::resources::ListResource;
use crate::infra::api::ApiClient;
use crate::infra::error::ApiError;

pub struct MutationCoordinator<T: ListResource> {
    api: Arc<ApiClient>,
    cache: QueryCache<T>,
}

impl<T: ListResource> MutationCoordinator<T> {
    pub(crate) fn new(api: Arc<ApiClient>, cache: QueryCache<T>) -> Self {
        Self { api, cache }
    }

    pub async fn create(&self, payload: &T::Payload) -> Result<Option<T>, ApiError> {
        let record = self.api.create::<T>(payload).await?;
        self.invalidated("create");
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, payload: &T::Payload) -> Result<Option<T>, ApiError> {
        let record = self.api.update::<T>(&id.to_string(), payload).await?;
        self.invalidated("update");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<T>, ApiError> {
        let record = self.api.delete::<T>(&id.to_string()).await?;
        self.invalidated("delete");
        Ok(record)
    }

    fn invalidated(&self, op: &'static str) {
        let marked = self.cache.invalidate_all();
        debug!(resource = %T::PATH, op, marked, "Mutation invalidated cached queries");
    }
}
