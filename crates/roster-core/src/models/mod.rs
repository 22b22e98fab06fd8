//! # Domain Models
//!
//! Organization-scoped entities and their view models.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Organization (tenant root)                                             │
//! │   ├── Gym                                                               │
//! │   ├── Department ◄── Position ◄── Application                           │
//! │   ├── Task                                                              │
//! │   └── User                                                              │
//! │                                                                         │
//! │  Each entity:  <Entity>        persisted shape (BaseEntity + columns)   │
//! │                Create<Entity>  view model accepted on create            │
//! │                Update<Entity>  view model accepted on update            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod application;
pub mod department;
pub mod gym;
pub mod organization;
pub mod position;
pub mod task;
pub mod user;

pub use application::{Application, CreateApplication, UpdateApplication, APPLICATION_STATUSES};
pub use department::{CreateDepartment, Department, UpdateDepartment};
pub use gym::{CreateGym, Gym, UpdateGym};
pub use organization::Organization;
pub use position::{CreatePosition, Position, UpdatePosition};
pub use task::{CreateTask, Task, UpdateTask, TASK_STATUSES};
pub use user::{CreateUser, UpdateUser, User, USER_ROLES};

/// Overwrites `target` when the update view model carries a value.
#[inline]
pub(crate) fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

/// Like [`merge`], for nullable columns.
#[inline]
pub(crate) fn merge_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}
