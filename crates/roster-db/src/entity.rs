//! # Entity Mapping
//!
//! Binds each domain model to its registered table and spells out, field
//! by field, which column every value goes to. Rows come back through the
//! `FromRow` derives on the models themselves.

use roster_core::{Application, BaseEntity, Department, Gym, Model, Position, Task, User};
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

use crate::schema::{self, Table};
use crate::value::Record;

/// A model the generic repository can persist.
pub trait Entity: Model + for<'r> FromRow<'r, SqliteRow> {
    /// Registry entry for the backing table.
    fn table() -> &'static Table;

    /// Every column of the row, base columns first.
    fn to_record(&self) -> Record;
}

/// Base columns in registry order.
pub fn base_record(base: &BaseEntity) -> Record {
    Record::new()
        .with("Uid", &base.uid)
        .with("OrgId", &base.org_id)
        .with("IsActive", base.is_active)
        .with("IsDeleted", base.is_deleted)
        .with("CreatedBy", &base.created_by)
        .with("CreatedOn", base.created_on)
        .with("ModifiedBy", base.modified_by.clone())
        .with("ModifiedOn", base.modified_on)
        .with("DeletedOn", base.deleted_on)
}

impl Entity for Gym {
    fn table() -> &'static Table {
        &schema::GYMS
    }

    fn to_record(&self) -> Record {
        base_record(&self.base)
            .with("Name", &self.name)
            .with("Address", self.address.clone())
            .with("Phone", self.phone.clone())
            .with("Capacity", self.capacity)
    }
}

impl Entity for Department {
    fn table() -> &'static Table {
        &schema::DEPARTMENTS
    }

    fn to_record(&self) -> Record {
        base_record(&self.base)
            .with("Name", &self.name)
            .with("Description", self.description.clone())
    }
}

impl Entity for Position {
    fn table() -> &'static Table {
        &schema::POSITIONS
    }

    fn to_record(&self) -> Record {
        base_record(&self.base)
            .with("DepartmentUid", &self.department_uid)
            .with("Title", &self.title)
            .with("Description", self.description.clone())
            .with("Openings", self.openings)
    }
}

impl Entity for Task {
    fn table() -> &'static Table {
        &schema::TASKS
    }

    fn to_record(&self) -> Record {
        base_record(&self.base)
            .with("Title", &self.title)
            .with("Description", self.description.clone())
            .with("AssigneeUid", self.assignee_uid.clone())
            .with("DueOn", self.due_on)
            .with("Status", &self.status)
    }
}

impl Entity for Application {
    fn table() -> &'static Table {
        &schema::APPLICATIONS
    }

    fn to_record(&self) -> Record {
        base_record(&self.base)
            .with("PositionUid", &self.position_uid)
            .with("CandidateName", &self.candidate_name)
            .with("CandidateEmail", &self.candidate_email)
            .with("Status", &self.status)
            .with("Notes", self.notes.clone())
    }
}

impl Entity for User {
    fn table() -> &'static Table {
        &schema::USERS
    }

    fn to_record(&self) -> Record {
        base_record(&self.base)
            .with("Email", &self.email)
            .with("FullName", &self.full_name)
            .with("PasswordHash", &self.password_hash)
            .with("Role", &self.role)
    }
}
