//! # Table Registry
//!
//! Closed, compile-time list of the tables the generic layer may touch.
//!
//! Every identifier that reaches generated SQL comes from here. Client
//! input such as `sortBy=created_on` is resolved through
//! [`Table::resolve_column`] and anything unknown is rejected, so no
//! caller-supplied text is ever interpolated into a statement.

/// Columns shared by every tenant-scoped table.
pub const BASE_COLUMNS: &[&str] = &[
    "Uid",
    "OrgId",
    "IsActive",
    "IsDeleted",
    "CreatedBy",
    "CreatedOn",
    "ModifiedBy",
    "ModifiedOn",
    "DeletedOn",
];

/// Static description of one table.
#[derive(Debug, PartialEq, Eq)]
pub struct Table {
    /// Logical entity name (`"Gym"`).
    pub entity: &'static str,
    /// Physical table name (`"Gyms"`).
    pub name: &'static str,
    /// Every column, base columns first.
    pub columns: &'static [&'static str],
    /// Columns matched by the search keyword.
    pub search_columns: &'static [&'static str],
}

impl Table {
    /// Exact column lookup.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Maps a client-supplied column name to the canonical one.
    ///
    /// Matching ignores case and underscores, so `created_on`,
    /// `createdOn` and `CreatedOn` all resolve to `CreatedOn`.
    pub fn resolve_column(&self, input: &str) -> Option<&'static str> {
        let wanted = normalize(input);
        if wanted.is_empty() {
            return None;
        }
        self.columns
            .iter()
            .copied()
            .find(|column| normalize(column) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Tables
// =============================================================================

pub const GYMS: Table = Table {
    entity: "Gym",
    name: "Gyms",
    columns: &[
        "Uid", "OrgId", "IsActive", "IsDeleted", "CreatedBy", "CreatedOn", "ModifiedBy",
        "ModifiedOn", "DeletedOn", "Name", "Address", "Phone", "Capacity",
    ],
    search_columns: &["Name", "Address"],
};

pub const DEPARTMENTS: Table = Table {
    entity: "Department",
    name: "Departments",
    columns: &[
        "Uid", "OrgId", "IsActive", "IsDeleted", "CreatedBy", "CreatedOn", "ModifiedBy",
        "ModifiedOn", "DeletedOn", "Name", "Description",
    ],
    search_columns: &["Name", "Description"],
};

pub const POSITIONS: Table = Table {
    entity: "Position",
    name: "Positions",
    columns: &[
        "Uid", "OrgId", "IsActive", "IsDeleted", "CreatedBy", "CreatedOn", "ModifiedBy",
        "ModifiedOn", "DeletedOn", "DepartmentUid", "Title", "Description", "Openings",
    ],
    search_columns: &["Title", "Description"],
};

pub const TASKS: Table = Table {
    entity: "Task",
    name: "Tasks",
    columns: &[
        "Uid", "OrgId", "IsActive", "IsDeleted", "CreatedBy", "CreatedOn", "ModifiedBy",
        "ModifiedOn", "DeletedOn", "Title", "Description", "AssigneeUid", "DueOn", "Status",
    ],
    search_columns: &["Title", "Description"],
};

pub const APPLICATIONS: Table = Table {
    entity: "Application",
    name: "Applications",
    columns: &[
        "Uid", "OrgId", "IsActive", "IsDeleted", "CreatedBy", "CreatedOn", "ModifiedBy",
        "ModifiedOn", "DeletedOn", "PositionUid", "CandidateName", "CandidateEmail", "Status",
        "Notes",
    ],
    search_columns: &["CandidateName", "CandidateEmail"],
};

pub const USERS: Table = Table {
    entity: "User",
    name: "Users",
    columns: &[
        "Uid", "OrgId", "IsActive", "IsDeleted", "CreatedBy", "CreatedOn", "ModifiedBy",
        "ModifiedOn", "DeletedOn", "Email", "FullName", "PasswordHash", "Role",
    ],
    search_columns: &["Email", "FullName"],
};

/// Every registered table.
pub static TABLES: &[&Table] = &[&GYMS, &DEPARTMENTS, &POSITIONS, &TASKS, &APPLICATIONS, &USERS];

/// Resolves a logical entity name or a physical table name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static Table> {
    TABLES
        .iter()
        .copied()
        .find(|t| t.entity.eq_ignore_ascii_case(name) || t.name.eq_ignore_ascii_case(name))
}
