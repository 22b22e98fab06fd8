//! # Repository Module
//!
//! Data access for Roster.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  BaseService<Gym>                                                      │
//! │       │                                                                 │
//! │       │  uow.repository::<Gym>().find_list("T1", &filter)              │
//! │       ▼                                                                 │
//! │  Repository<Gym>                                                       │
//! │  ├── QueryGenerator(&GYMS)  → parameterized SQL                        │
//! │  └── QueryExecutor          → pool or live transaction                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  One generic implementation serves every tenant-scoped table. Only    │
//! │  the tenant root (Organizations) has a hand-written repository.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`Repository`](generic::Repository) - Generic CRUD for any [`Entity`](crate::Entity)
//! - [`OrganizationRepository`](organization::OrganizationRepository) - Tenant root

pub mod generic;
pub mod organization;
