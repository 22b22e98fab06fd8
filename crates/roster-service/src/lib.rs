//! # roster-service: Business Rules for Roster
//!
//! Wraps the generic repository with the create/update/delete flows every
//! entity shares, and lets each entity plug its own rules in via hooks.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BaseService<Application, ApplicationRules>::create(model)             │
//! │       │                                                                 │
//! │       ├── hooks.validate_add(model)      ← email format, position      │
//! │       │                                     exists in tenant            │
//! │       ├── Application::from_create(model)                              │
//! │       ├── stamp_created(ctx)             ← Uid, OrgId, CreatedBy...    │
//! │       ├── hooks.pre_add(entity)                                        │
//! │       ├── repository.create(entity)                                    │
//! │       ├── hooks.post_add(entity)         ← "application received"      │
//! │       └── re-fetch → EntityResult::Entity                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tenant Rules
//! - Reads are scoped to `ctx.tenant_id`; other tenants' rows are 404
//! - Updates and hard deletes on another tenant's row are 403 and write
//!   nothing
//!
//! ## Modules
//! - [`base`] - Generic [`BaseService`]
//! - [`hooks`] - [`ServiceHooks`] extension points
//! - [`rules`] - Per-entity hook implementations
//! - [`password`] - Argon2id hashing
//! - [`notification`] - Outbound notification boundary
//! - [`error`] - [`ServiceError`]

pub mod base;
pub mod error;
pub mod hooks;
pub mod notification;
pub mod password;
pub mod rules;

pub use base::BaseService;
pub use error::{ServiceError, ServiceResult};
pub use hooks::{NoHooks, Scope, ServiceHooks};
pub use notification::{Notification, Notifier, TracingNotifier};
pub use rules::{
    ApplicationRules, DepartmentRules, GymRules, PositionRules, TaskRules, UserRules,
};

use roster_core::{Application, Department, Gym, Position, Task, User};

pub type GymService = BaseService<Gym, GymRules>;
pub type DepartmentService = BaseService<Department, DepartmentRules>;
pub type PositionService = BaseService<Position, PositionRules>;
pub type TaskService = BaseService<Task, TaskRules>;
pub type ApplicationService = BaseService<Application, ApplicationRules>;
pub type UserService = BaseService<User, UserRules>;
