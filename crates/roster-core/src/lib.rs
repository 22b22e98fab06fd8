//! # roster-core: Pure Domain Types for Roster
//!
//! This crate holds every type the Roster layers agree on, as plain data
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Roster Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   apps/api (axum REST)                          │   │
//! │  │     auth ──► RequestContext ──► resource routes ──► envelopes   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 roster-service (BaseService + hooks)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        roster-db (query generator, executor, repository)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ roster-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  entity  │ │  filter  │ │  paging  │ │ models (Gym, ...)│  │   │
//! │  │   │BaseEntity│ │  Filter  │ │Pagination│ │ Create / Update  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entity`] - `BaseEntity` audit columns and the [`Model`] trait
//! - [`context`] - Per-request tenant/user/request identity
//! - [`filter`] - List filter with page clamping rules
//! - [`paging`] - Pagination metadata and result wrappers
//! - [`models`] - Organization-scoped domain entities and view models
//! - [`validation`] - Business rule validation helpers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use roster_core::filter::Filter;
//!
//! let filter = Filter::new().page(3).page_size(250);
//!
//! // Page size is clamped to the hard cap of 100
//! assert_eq!(filter.effective_page_size(), 100);
//! assert_eq!(filter.offset(), 200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod context;
pub mod entity;
pub mod error;
pub mod filter;
pub mod models;
pub mod paging;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use context::RequestContext;
pub use entity::{BaseEntity, Model};
pub use error::ValidationError;
pub use filter::{Filter, SortOrder};
pub use models::*;
pub use paging::{EntityResult, PagedResult, PaginatedResult, Pagination};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a filter does not carry a positive page size.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard cap on rows returned by a single list query.
pub const MAX_PAGE_SIZE: i64 = 100;
