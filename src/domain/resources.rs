//! Resource bindings: each list resource ties a record type to its API path
//! and mutation payload.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use scorta_api_types::{
    CategoryPayload, CategoryRecord, InventoryPayload, InventoryRecord, MeasureUnitPayload,
    MeasureUnitRecord, ProductPayload, ProductRecord,
};

/// API path of a list resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    Inventories,
    Products,
    Categories,
    MeasureUnits,
}

impl ResourcePath {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inventories => "api/v1/inventories",
            Self::Products => "api/v1/products",
            Self::Categories => "api/v1/categories",
            Self::MeasureUnits => "api/v1/measure-units",
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record type served by a paginated list endpoint.
///
/// The trait is the seam the generic cache/controller/mutation machinery
/// hangs off; implementations are the four console resources.
pub trait ListResource: Clone + DeserializeOwned + Send + Sync + 'static {
    const PATH: ResourcePath;
    type Payload: Serialize + Send + Sync;
}

impl ListResource for InventoryRecord {
    const PATH: ResourcePath = ResourcePath::Inventories;
    type Payload = InventoryPayload;
}

impl ListResource for ProductRecord {
    const PATH: ResourcePath = ResourcePath::Products;
    type Payload = ProductPayload;
}

impl ListResource for CategoryRecord {
    const PATH: ResourcePath = ResourcePath::Categories;
    type Payload = CategoryPayload;
}

impl ListResource for MeasureUnitRecord {
    const PATH: ResourcePath = ResourcePath::MeasureUnits;
    type Payload = MeasureUnitPayload;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_distinct() {
        let paths = [
            ResourcePath::Inventories,
            ResourcePath::Products,
            ResourcePath::Categories,
            ResourcePath::MeasureUnits,
        ];
        for (i, a) in paths.iter().enumerate() {
            for b in &paths[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(
            ResourcePath::MeasureUnits.to_string(),
            "api/v1/measure-units"
        );
    }
}
