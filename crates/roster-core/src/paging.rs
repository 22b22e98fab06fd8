//! # Paging and Result Wrappers
//!
//! Shapes returned by list and single-entity operations. All of them are
//! built fresh per query and never persisted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pagination metadata attached to a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Computes metadata for `total` rows split into pages of `limit`.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        let total_pages = (total + limit - 1) / limit;

        Pagination {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of rows plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        PaginatedResult { data, pagination }
    }

    /// Transforms each row, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Page envelope used inside [`EntityResult::Paged`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PagedResult<T> {
    pub page_index: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub result: Option<Vec<T>>,
}

impl<T> From<PaginatedResult<T>> for PagedResult<T> {
    fn from(page: PaginatedResult<T>) -> Self {
        PagedResult {
            page_index: page.pagination.page,
            page_size: page.pagination.limit,
            total_records: page.pagination.total,
            result: Some(page.data),
        }
    }
}

/// Either a single entity or a page of entities, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum EntityResult<T> {
    Entity(T),
    Paged(PagedResult<T>),
}

impl<T> EntityResult<T> {
    pub fn single(entity: T) -> Self {
        EntityResult::Entity(entity)
    }

    pub fn paged(page: impl Into<PagedResult<T>>) -> Self {
        EntityResult::Paged(page.into())
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            EntityResult::Entity(entity) => Some(entity),
            EntityResult::Paged(_) => None,
        }
    }

    pub fn page(&self) -> Option<&PagedResult<T>> {
        match self {
            EntityResult::Entity(_) => None,
            EntityResult::Paged(page) => Some(page),
        }
    }

    /// Consumes the wrapper, returning the single entity if present.
    pub fn into_entity(self) -> Option<T> {
        match self {
            EntityResult::Entity(entity) => Some(entity),
            EntityResult::Paged(_) => None,
        }
    }
}
