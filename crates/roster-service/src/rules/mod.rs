//! # Entity Rules
//!
//! One [`ServiceHooks`](crate::ServiceHooks) implementation per entity.
//!
//! | Entity      | validate                                    | side effects        |
//! |-------------|---------------------------------------------|---------------------|
//! | Gym         | name, address, phone, capacity              |                     |
//! | Department  | name, description                           |                     |
//! | Position    | title, openings, department in tenant       |                     |
//! | Task        | title, status, assignee in tenant           |                     |
//! | Application | name, email, status, position in tenant     | notify on create    |
//! | User        | email (unique), name, password, role        | hash password       |

mod application;
mod department;
mod gym;
mod position;
mod task;
mod user;

pub use application::ApplicationRules;
pub use department::DepartmentRules;
pub use gym::GymRules;
pub use position::PositionRules;
pub use task::TaskRules;
pub use user::{authenticate, find_by_email, UserRules};

use roster_core::ValidationError;

/// Upper bound for short names and titles.
pub(crate) const NAME_MAX: usize = 200;

/// Upper bound for free-text descriptions and notes.
pub(crate) const TEXT_MAX: usize = 2000;

pub(crate) fn unknown_reference(field: &str, entity: &str, id: &str) -> ValidationError {
    ValidationError::UnknownReference {
        field: field.to_string(),
        entity: entity.to_string(),
        id: id.to_string(),
    }
}
