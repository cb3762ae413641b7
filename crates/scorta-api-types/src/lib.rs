//! Wire types for the Scorta console API.
//!
//! Every endpoint wraps its payload in [`ApiEnvelope`]; list endpoints carry
//! a [`ListData`] with page metadata. These shapes are shared by the query
//! layer, the CLI, and test fixtures so the contract lives in one place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// ============================================================================
// Envelope
// ============================================================================

/// Standard response envelope: `{ data, message, status }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub message: String,
    pub status: u16,
}

/// Body shape of a non-2xx response.
///
/// `errors` is present on validation failures (422) and maps field names to
/// their messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

// ============================================================================
// Pagination
// ============================================================================

/// Page metadata returned alongside list records.
///
/// `total` counts every record matching the current filter, not just the
/// records on this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

/// Payload of a list endpoint: `{ records, page_meta }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData<T> {
    pub records: Vec<T>,
    pub page_meta: PageMeta,
}

/// One resolved page of a list resource.
///
/// Flattened from [`ListData`] for consumers; invariants:
/// `records.len() <= size` and `page >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> RecordPage<T> {
    pub fn empty(page: u32, size: u32) -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            page,
            size,
        }
    }

    /// Whether a further page exists.
    ///
    /// A short page (`records.len() < size`) is always the last one; a full
    /// page has a successor only while `page * size` has not consumed
    /// `total`.
    pub fn has_next(&self) -> bool {
        self.records.len() as u32 == self.size
            && u64::from(self.page) * u64::from(self.size) < self.total
    }
}

impl<T> From<ListData<T>> for RecordPage<T> {
    fn from(data: ListData<T>) -> Self {
        Self {
            records: data.records,
            total: data.page_meta.total,
            page: data.page_meta.page,
            size: data.page_meta.size,
        }
    }
}

// ============================================================================
// Resource records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub remark: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureUnitRecord {
    pub id: Uuid,
    pub name: String,
    pub abbreviation: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub unit_id: Uuid,
    pub unit_name: Option<String>,
    pub price: Option<f64>,
    pub remark: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub warehouse: Option<String>,
    pub quantity: f64,
    pub unit_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

// ============================================================================
// Mutation payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureUnitPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub sku: String,
    pub category_id: Uuid,
    pub unit_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPayload {
    pub product_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
    pub quantity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(len: usize, total: u64, page: u32, size: u32) -> RecordPage<u32> {
        RecordPage {
            records: (0..len as u32).collect(),
            total,
            page,
            size,
        }
    }

    #[test]
    fn short_page_has_no_next() {
        assert!(!page_of(4, 4, 1, 5).has_next());
    }

    #[test]
    fn full_page_with_remainder_has_next() {
        assert!(page_of(5, 12, 1, 5).has_next());
        assert!(page_of(5, 12, 2, 5).has_next());
    }

    #[test]
    fn exactly_consumed_total_has_no_next() {
        assert!(!page_of(5, 10, 2, 5).has_next());
    }

    #[test]
    fn record_page_flattens_list_data() {
        let data = ListData {
            records: vec![1u32, 2, 3],
            page_meta: PageMeta {
                total: 3,
                page: 1,
                size: 10,
            },
        };
        let page = RecordPage::from(data);
        assert_eq!(page.records, vec![1, 2, 3]);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 10);
    }

    #[test]
    fn envelope_decodes_list_payload() {
        let body = r#"{
            "data": { "records": [7, 8], "page_meta": { "total": 2, "page": 1, "size": 5 } },
            "message": "ok",
            "status": 200
        }"#;
        let envelope: ApiEnvelope<ListData<u32>> =
            serde_json::from_str(body).expect("decoded envelope");
        assert_eq!(envelope.status, 200);
        let page = RecordPage::from(envelope.data.expect("list data"));
        assert_eq!(page.records, vec![7, 8]);
        assert!(!page.has_next());
    }

    #[test]
    fn error_body_carries_field_messages() {
        let body = r#"{
            "message": "validation failed",
            "status": 422,
            "errors": { "name": ["must not be empty"] }
        }"#;
        let parsed: ErrorBody = serde_json::from_str(body).expect("decoded error body");
        assert_eq!(parsed.status, 422);
        let errors = parsed.errors.expect("field errors");
        assert_eq!(errors["name"], vec!["must not be empty".to_string()]);
    }
}
