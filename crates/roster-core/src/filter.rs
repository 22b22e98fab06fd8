//! # List Filter
//!
//! Paging, sorting and keyword search for list queries.
//!
//! ## Clamping Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  page       → max(page, 1)                     (unset → 1)              │
//! │  page_size  → min(max(page_size, 1), 100)      when page_size > 0       │
//! │             → 20                               otherwise                │
//! │  offset     → (page - 1) * page_size                                    │
//! │                                                                         │
//! │  ?page=3&pageSize=250  →  LIMIT 100 OFFSET 200                          │
//! │  ?page=0&pageSize=-5   →  LIMIT 20  OFFSET 0                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `sort_by` arrives from clients as free text. It is resolved against the
//! table's known columns before it reaches SQL (see `roster_db::schema`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Asc,
    #[default]
    #[serde(alias = "desc")]
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter applied to list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Filter {
    /// 1-indexed page number.
    pub page: Option<i64>,

    /// Rows per page, clamped to `[1, 100]`.
    pub page_size: Option<i64>,

    /// Column to sort by (validated against the table before use).
    pub sort_by: Option<String>,

    pub sort_order: SortOrder,

    /// Matched with LIKE against the table's search columns.
    pub search_keyword: Option<String>,
}

impl Filter {
    /// Creates an empty filter (first page, default size, no sort).
    pub fn new() -> Self {
        Filter::default()
    }

    /// Sets the page number.
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the sort column and direction.
    pub fn sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(column.into());
        self.sort_order = order;
        self
    }

    /// Sets the search keyword.
    pub fn search(mut self, keyword: impl Into<String>) -> Self {
        self.search_keyword = Some(keyword.into());
        self
    }

    /// Page number after clamping (never below 1).
    pub fn effective_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size after clamping.
    pub fn effective_page_size(&self) -> i64 {
        match self.page_size {
            Some(size) if size > 0 => size.clamp(1, MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    /// Row offset of the first row on the effective page. Saturates at
    /// `i64::MAX` so an absurd page reads as past the end.
    pub fn offset(&self) -> i64 {
        (self.effective_page() - 1).saturating_mul(self.effective_page_size())
    }

    /// True iff both page and page size were supplied.
    pub fn is_paged(&self) -> bool {
        self.page.is_some() && self.page_size.is_some()
    }

    /// Trimmed, non-empty search keyword.
    pub fn keyword(&self) -> Option<&str> {
        self.search_keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Copy of this filter with paging removed (sort/search kept).
    pub fn without_paging(&self) -> Self {
        Filter {
            page: None,
            page_size: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filter = Filter::new();
        assert_eq!(filter.effective_page(), 1);
        assert_eq!(filter.effective_page_size(), 20);
        assert_eq!(filter.offset(), 0);
        assert_eq!(filter.sort_order, SortOrder::Desc);
        assert!(!filter.is_paged());
    }

    #[test]
    fn test_page_size_clamping() {
        assert_eq!(Filter::new().page_size(250).effective_page_size(), 100);
        assert_eq!(Filter::new().page_size(100).effective_page_size(), 100);
        assert_eq!(Filter::new().page_size(1).effective_page_size(), 1);
        assert_eq!(Filter::new().page_size(0).effective_page_size(), 20);
        assert_eq!(Filter::new().page_size(-5).effective_page_size(), 20);
    }

    #[test]
    fn test_offset_formula() {
        for page in -2..6 {
            for size in [-1, 0, 1, 10, 20, 99, 100, 101, 500] {
                let filter = Filter::new().page(page).page_size(size);
                let expected_size = if size > 0 { size.clamp(1, 100) } else { 20 };
                let expected = (page.max(1) - 1) * expected_size;
                assert_eq!(filter.offset(), expected, "page={page} size={size}");
            }
        }
    }

    #[test]
    fn test_huge_page_saturates() {
        let filter = Filter::new().page(i64::MAX).page_size(10);
        assert_eq!(filter.effective_page(), i64::MAX);
        assert_eq!(filter.offset(), i64::MAX);

        let filter = Filter::new().page(i64::MAX / 10 + 2).page_size(10);
        assert_eq!(filter.offset(), i64::MAX);
    }

    #[test]
    fn test_keyword_trimmed() {
        assert_eq!(Filter::new().search("  acme ").keyword(), Some("acme"));
        assert_eq!(Filter::new().search("   ").keyword(), None);
    }

    #[test]
    fn test_deserialize_query_shape() {
        let filter: Filter = serde_json::from_str(
            r#"{"page":2,"pageSize":10,"sortBy":"name","sortOrder":"asc"}"#,
        )
        .unwrap();
        assert!(filter.is_paged());
        assert_eq!(filter.sort_order, SortOrder::Asc);
        assert_eq!(filter.without_paging().page, None);
        assert_eq!(filter.without_paging().sort_by.as_deref(), Some("name"));
    }
}
