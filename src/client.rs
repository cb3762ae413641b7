//! Console assembly.
//!
//! One [`Console`] per application: it builds the API client and one cache
//! per resource at construction time and hands out resource handles. No
//! hidden module-level state; tests construct an isolated console per case.

use std::sync::Arc;

use scorta_api_types::{CategoryRecord, InventoryRecord, MeasureUnitRecord, ProductRecord};

use crate::application::resource::ResourceHandle;
use crate::cache::{CacheConfig, QueryCache};
use crate::config::Settings;
use crate::infra::api::{ApiClient, AuthProvider};
use crate::infra::error::InfraError;

/// Entry point to the query layer.
pub struct Console {
    api: Arc<ApiClient>,
    cache_config: CacheConfig,
    inventories: QueryCache<InventoryRecord>,
    products: QueryCache<ProductRecord>,
    categories: QueryCache<CategoryRecord>,
    measure_units: QueryCache<MeasureUnitRecord>,
}

impl Console {
    pub fn new(settings: &Settings, auth: Arc<dyn AuthProvider>) -> Result<Self, InfraError> {
        let api = Arc::new(ApiClient::new(&settings.api, auth)?);
        let cache_config = CacheConfig::from(&settings.cache);
        Ok(Self {
            api,
            inventories: QueryCache::new(cache_config.clone()),
            products: QueryCache::new(cache_config.clone()),
            categories: QueryCache::new(cache_config.clone()),
            measure_units: QueryCache::new(cache_config.clone()),
            cache_config,
        })
    }

    /// Handle for the inventories list page.
    pub fn inventories(&self) -> ResourceHandle<InventoryRecord> {
        ResourceHandle::new(
            Arc::clone(&self.api),
            self.inventories.clone(),
            &self.cache_config,
        )
    }

    /// Handle for the products list page.
    pub fn products(&self) -> ResourceHandle<ProductRecord> {
        ResourceHandle::new(
            Arc::clone(&self.api),
            self.products.clone(),
            &self.cache_config,
        )
    }

    /// Handle for the categories list page; also backs category option
    /// lookups.
    pub fn categories(&self) -> ResourceHandle<CategoryRecord> {
        ResourceHandle::new(
            Arc::clone(&self.api),
            self.categories.clone(),
            &self.cache_config,
        )
    }

    /// Handle for the measurement-units list page; also backs unit option
    /// lookups.
    pub fn measure_units(&self) -> ResourceHandle<MeasureUnitRecord> {
        ResourceHandle::new(
            Arc::clone(&self.api),
            self.measure_units.clone(),
            &self.cache_config,
        )
    }
}
