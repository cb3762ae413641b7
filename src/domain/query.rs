//! List query values and partial-update merging.
//!
//! A [`ListQuery`] is an immutable value; merging a [`QueryUpdate`] produces
//! a new query. The page-reset invariant lives here: changing the keyword or
//! any filter resets the page to 1, since a filtered result set has no
//! relation to the previous pagination window.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const FIRST_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Current query of one list page: pagination, keyword search, and
/// resource-specific filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub keyword: String,
    /// Ordered map so field-wise equal queries compare and hash equal
    /// regardless of insertion order.
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            size: DEFAULT_PAGE_SIZE,
            keyword: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(FIRST_PAGE),
            size: size.max(1),
            ..Default::default()
        }
    }

    /// Merge a partial update into this query, producing a new one.
    ///
    /// Applies the page-reset invariant: if the update changes the keyword
    /// or the filter set, the resulting page is 1 even when the update also
    /// names a page.
    pub fn merge(&self, update: &QueryUpdate) -> Self {
        let mut next = self.clone();
        if let Some(page) = update.page {
            next.page = page.max(FIRST_PAGE);
        }
        if let Some(size) = update.size {
            next.size = size.max(1);
        }
        if let Some(keyword) = &update.keyword {
            next.keyword = keyword.clone();
        }
        if let Some(filters) = &update.filters {
            next.filters = filters.clone();
        }

        let scope_changed = normalize_keyword(&next.keyword) != normalize_keyword(&self.keyword)
            || normalize_filters(&next.filters) != normalize_filters(&self.filters);
        if scope_changed {
            next.page = FIRST_PAGE;
        }
        next
    }

    /// Canonical form used for cache keys and wire encoding: keyword
    /// trimmed, empty-valued filters dropped, page/size clamped.
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(FIRST_PAGE),
            size: self.size.max(1),
            keyword: normalize_keyword(&self.keyword),
            filters: normalize_filters(&self.filters),
        }
    }

    /// Encode as query-string pairs; empty keyword is omitted.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let normalized = self.normalized();
        let mut pairs = vec![
            ("page".to_string(), normalized.page.to_string()),
            ("size".to_string(), normalized.size.to_string()),
        ];
        if !normalized.keyword.is_empty() {
            pairs.push(("keyword".to_string(), normalized.keyword));
        }
        for (key, value) in normalized.filters {
            pairs.push((key, value));
        }
        pairs
    }
}

fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_string()
}

fn normalize_filters(filters: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    filters
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key.clone(), value.trim().to_string()))
        .collect()
}

/// Partial update merged into the current query by `on_query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub keyword: Option<String>,
    pub filters: Option<BTreeMap<String, String>>,
}

impl QueryUpdate {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn size(size: u32) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Default::default()
        }
    }

    pub fn filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut filters = BTreeMap::new();
        filters.insert(key.into(), value.into());
        Self {
            filters: Some(filters),
            ..Default::default()
        }
    }

    /// True when the update touches only the keyword; such updates are
    /// debounced, everything else issues immediately.
    pub fn is_keyword_only(&self) -> bool {
        self.keyword.is_some()
            && self.page.is_none()
            && self.size.is_none()
            && self.filters.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_change_resets_page() {
        let query = ListQuery::default().merge(&QueryUpdate::page(5));
        assert_eq!(query.page, 5);

        let query = query.merge(&QueryUpdate::keyword("x"));
        assert_eq!(query.page, 1);
        assert_eq!(query.keyword, "x");
    }

    #[test]
    fn filter_change_resets_page() {
        let query = ListQuery::default().merge(&QueryUpdate::page(3));
        let query = query.merge(&QueryUpdate::filter("category_id", "abc"));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn page_change_keeps_keyword() {
        let query = ListQuery::default().merge(&QueryUpdate::keyword("bolt"));
        let query = query.merge(&QueryUpdate::page(2));
        assert_eq!(query.page, 2);
        assert_eq!(query.keyword, "bolt");
    }

    #[test]
    fn unchanged_keyword_does_not_reset_page() {
        let query = ListQuery::default().merge(&QueryUpdate::keyword("bolt"));
        let query = query.merge(&QueryUpdate::page(4));
        // Re-sending the same keyword (e.g. a re-render) must not reset.
        let query = query.merge(&QueryUpdate::keyword("bolt"));
        assert_eq!(query.page, 4);
    }

    #[test]
    fn normalization_trims_and_drops_empty_filters() {
        let mut filters = BTreeMap::new();
        filters.insert("warehouse".to_string(), " main ".to_string());
        filters.insert("category_id".to_string(), "  ".to_string());
        let query = ListQuery {
            page: 0,
            size: 0,
            keyword: "  bolt ".to_string(),
            filters,
        };

        let normalized = query.normalized();
        assert_eq!(normalized.page, 1);
        assert_eq!(normalized.size, 1);
        assert_eq!(normalized.keyword, "bolt");
        assert_eq!(normalized.filters.len(), 1);
        assert_eq!(normalized.filters["warehouse"], "main");
    }

    #[test]
    fn query_pairs_omit_empty_keyword() {
        let query = ListQuery::new(2, 20);
        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_include_filters_in_stable_order() {
        let query = ListQuery::default()
            .merge(&QueryUpdate::filter("warehouse", "main"))
            .merge(&QueryUpdate::keyword("bolt"));
        let mut query = query;
        query
            .filters
            .insert("category_id".to_string(), "c1".to_string());

        let pairs = query.to_query_pairs();
        assert_eq!(pairs[2], ("keyword".to_string(), "bolt".to_string()));
        // BTreeMap ordering: category_id before warehouse.
        assert_eq!(pairs[3].0, "category_id");
        assert_eq!(pairs[4].0, "warehouse");
    }

    #[test]
    fn keyword_only_detection() {
        assert!(QueryUpdate::keyword("x").is_keyword_only());
        assert!(!QueryUpdate::page(2).is_keyword_only());

        let mixed = QueryUpdate {
            keyword: Some("x".to_string()),
            page: Some(1),
            ..Default::default()
        };
        assert!(!mixed.is_keyword_only());
    }
}
