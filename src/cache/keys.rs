//! Cache key derivation.
//!
//! A [`QueryKey`] identifies a (resource, query) pair. Keys are built from
//! the normalized query, so field-wise equal queries map to the same entry
//! regardless of filter insertion order or keyword whitespace.

use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::query::ListQuery;
use crate::domain::resources::ResourcePath;

/// Deterministic identifier of a (resource, query) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    path: ResourcePath,
    page: u32,
    size: u32,
    keyword: String,
    filters: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(path: ResourcePath, query: &ListQuery) -> Self {
        let normalized = query.normalized();
        Self {
            path,
            page: normalized.page,
            size: normalized.size,
            keyword: normalized.keyword,
            filters: normalized.filters,
        }
    }

    pub fn path(&self) -> ResourcePath {
        self.path
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?page={}&size={}", self.path, self.page, self.size)?;
        if !self.keyword.is_empty() {
            write!(f, "&keyword={}", self.keyword)?;
        }
        for (key, value) in &self.filters {
            write!(f, "&{key}={value}")?;
        }
        Ok(())
    }
}

/// Compute a hash for any hashable value.
pub fn hash_value<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
