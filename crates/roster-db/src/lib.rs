//! # roster-db: Database Layer for Roster
//!
//! Generic, tenant-aware data access over SQLite.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Roster Data Flow                                 │
//! │                                                                         │
//! │  BaseService::update(model, id)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     roster-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   UnitOfWork ──► Repository<E> ──► QueryGenerator ──► Query     │   │
//! │  │       │                │                                │       │   │
//! │  │       │                ▼                                ▼       │   │
//! │  │       └────────► QueryExecutor ◄────────────────────────┘       │   │
//! │  │                  (pool or live transaction)                     │   │
//! │  │                        │                                        │   │
//! │  │                        ▼                                        │   │
//! │  │                  DbError::classify (duplicate / FK / other)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and driver error classification
//! - [`schema`] - Closed registry of tables and columns
//! - [`value`] - Bound values and column/value records
//! - [`query`] - SQL text generation (never executes)
//! - [`executor`] - Query execution, pagination, transactions
//! - [`entity`] - Mapping between domain models and records
//! - [`repository`] - Generic repository plus the organization repository
//! - [`unit_of_work`] - Request-scoped repository access and transactions
//! - [`seed`] - Demo data seeders with batch history
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{Database, DbConfig};
//! use roster_core::Gym;
//!
//! let db = Database::new(DbConfig::new("./roster.db")).await?;
//! let gyms = db.unit_of_work().repository::<Gym>();
//! let page = gyms.find_list("org-1", &Filter::new().page(1).page_size(20)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entity;
pub mod error;
pub mod executor;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod unit_of_work;
pub mod value;

// =============================================================================
// Re-exports
// =============================================================================

pub use entity::Entity;
pub use error::{DbError, DbResult, ForeignKeyReason};
pub use executor::{ExecOutcome, MutationResult, QueryExecutor};
pub use pool::{Database, DbConfig};
pub use query::{Dialect, Query, QueryGenerator};
pub use schema::Table;
pub use seed::{SeedReport, SeedRunner, SeedStatus, Seeder};
pub use unit_of_work::UnitOfWork;
pub use value::{Record, SqlValue};

// Repository re-exports for convenience
pub use repository::generic::{InsertResult, Repository};
pub use repository::organization::OrganizationRepository;
