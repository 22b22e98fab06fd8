//! # Query Generator
//!
//! Builds parameterized SQL for one registered table. Nothing here touches
//! the database.
//!
//! ## Shape of a Generated Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select_all("T1", None, Some(filter))                                  │
//! │                                                                         │
//! │  SELECT * FROM Gyms                                                    │
//! │  WHERE IsDeleted = 0 AND OrgId = ?              ← always               │
//! │    AND (Name LIKE ? OR Address LIKE ?)          ← search keyword set   │
//! │  ORDER BY CreatedOn DESC                        ← sort_by set          │
//! │  LIMIT ? OFFSET ?                               ← page AND page_size   │
//! │                                                                         │
//! │  values: ["T1", "%acme%", "%acme%", 20, 0]                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are checked against the [`Table`]. Values only ever appear
//! as `?` placeholders, in the same order as [`Query::values`].

use chrono::{DateTime, Utc};
use roster_core::Filter;

use crate::error::{DbError, DbResult};
use crate::schema::Table;
use crate::value::{Record, SqlValue};

/// SQL flavor. Only the upsert clause differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    Sqlite,
    MySql,
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Query {
            sql: sql.into(),
            values: Vec::new(),
        }
    }

    /// Appends a positional parameter.
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Appends `LIMIT ? OFFSET ?` with the given values.
    pub fn paged(mut self, limit: i64, offset: i64) -> Self {
        self.sql.push_str(" LIMIT ? OFFSET ?");
        self.values.push(SqlValue::Int(limit));
        self.values.push(SqlValue::Int(offset));
        self
    }

    /// Leading SQL keyword, uppercased (`"SELECT"`, `"DELETE"`, ...).
    pub fn verb(&self) -> String {
        self.sql
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase()
    }

    /// True for statements that produce a result set.
    pub fn returns_rows(&self) -> bool {
        matches!(self.verb().as_str(), "SELECT" | "WITH" | "PRAGMA")
            || self.sql.to_ascii_uppercase().contains(" RETURNING ")
    }
}

/// Generates SQL for a single table.
#[derive(Debug, Clone, Copy)]
pub struct QueryGenerator {
    table: &'static Table,
    dialect: Dialect,
}

impl QueryGenerator {
    pub fn new(table: &'static Table) -> Self {
        QueryGenerator {
            table,
            dialect: Dialect::default(),
        }
    }

    pub fn with_dialect(table: &'static Table, dialect: Dialect) -> Self {
        QueryGenerator { table, dialect }
    }

    pub fn table(&self) -> &'static Table {
        self.table
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Tenant-scoped list of non-deleted rows.
    pub fn select_all(
        &self,
        org_id: &str,
        columns: Option<&[&str]>,
        filter: Option<&Filter>,
    ) -> DbResult<Query> {
        let projection = self.projection(columns)?;
        let mut query = Query::new(format!("SELECT {projection} FROM {}", self.table.name));
        self.push_scope(&mut query, org_id, filter);

        if let Some(filter) = filter {
            if let Some(sort_by) = filter.sort_by.as_deref() {
                let column = self.column(sort_by)?;
                query.sql.push_str(&format!(
                    " ORDER BY {column} {}",
                    filter.sort_order.as_sql()
                ));
            }
            if filter.is_paged() {
                query = query.paged(filter.effective_page_size(), filter.offset());
            }
        }

        Ok(query)
    }

    /// `COUNT(*)` over the same WHERE clause as [`select_all`](Self::select_all).
    pub fn count(&self, org_id: &str, filter: Option<&Filter>) -> DbResult<Query> {
        let mut query = Query::new(format!("SELECT COUNT(*) FROM {}", self.table.name));
        self.push_scope(&mut query, org_id, filter);
        Ok(query)
    }

    /// Tenant-scoped single row.
    pub fn select_by_id(&self, org_id: &str, id: &str, columns: Option<&[&str]>) -> DbResult<Query> {
        let projection = self.projection(columns)?;
        Ok(Query::new(format!(
            "SELECT {projection} FROM {} WHERE IsDeleted = 0 AND OrgId = ? AND Uid = ?",
            self.table.name
        ))
        .bind(org_id)
        .bind(id))
    }

    /// Non-deleted row regardless of tenant. Used for write-path ownership checks.
    pub fn select_by_id_any_tenant(&self, id: &str) -> DbResult<Query> {
        Ok(Query::new(format!(
            "SELECT * FROM {} WHERE IsDeleted = 0 AND Uid = ?",
            self.table.name
        ))
        .bind(id))
    }

    /// Row by id including soft-deleted rows.
    pub fn select_raw_by_id(&self, id: &str) -> DbResult<Query> {
        Ok(Query::new(format!("SELECT * FROM {} WHERE Uid = ?", self.table.name)).bind(id))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub fn insert(&self, record: &Record) -> DbResult<Query> {
        if record.is_empty() {
            return Err(DbError::InvalidQuery("insert requires at least one column".into()));
        }
        let columns = self.checked_columns(record)?;
        let placeholders = vec!["?"; columns.len()].join(", ");

        let mut query = Query::new(format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.table.name,
            columns.join(", ")
        ));
        query.values = record.iter().map(|(_, v)| v.clone()).collect();
        Ok(query)
    }

    /// Multi-row insert. The column list comes from the first record;
    /// columns a later record lacks are bound as NULL.
    pub fn insert_many(&self, records: &[Record]) -> DbResult<Query> {
        let (columns, values_sql, values) = self.values_block(records, "insert_many")?;
        let mut query = Query::new(format!(
            "INSERT INTO {} ({}) VALUES {values_sql}",
            self.table.name,
            columns.join(", ")
        ));
        query.values = values;
        Ok(query)
    }

    /// `UPDATE ... SET` for every column in `record` except `Uid`.
    ///
    /// Soft-deleted rows never match.
    pub fn update(&self, id: &str, record: &Record) -> DbResult<Query> {
        let record = record.without(&["Uid"]);
        if record.is_empty() {
            return Err(DbError::InvalidQuery("update requires at least one column".into()));
        }
        let columns = self.checked_columns(&record)?;
        let assignments: Vec<String> = columns.iter().map(|c| format!("{c} = ?")).collect();

        let mut query = Query::new(format!(
            "UPDATE {} SET {} WHERE Uid = ? AND IsDeleted = 0",
            self.table.name,
            assignments.join(", ")
        ));
        query.values = record.iter().map(|(_, v)| v.clone()).collect();
        Ok(query.bind(id))
    }

    /// Bulk update as one statement of per-column CASE expressions.
    ///
    /// ```text
    /// UPDATE Gyms SET
    ///   Name = CASE WHEN Uid = ? THEN ? WHEN Uid = ? THEN ? ELSE Name END
    /// WHERE Uid IN (?, ?) AND IsDeleted = 0
    /// ```
    pub fn update_many(&self, records: &[Record], exclude: &[&str]) -> DbResult<Query> {
        let first = records.first().ok_or(DbError::EmptyBatch {
            operation: "update_many",
        })?;

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            match record.get("Uid").and_then(SqlValue::as_text) {
                Some(id) => ids.push(id.to_string()),
                None => {
                    return Err(DbError::InvalidQuery(
                        "update_many records must carry Uid".into(),
                    ))
                }
            }
        }

        let columns: Vec<&'static str> = self
            .checked_columns(first)?
            .into_iter()
            .filter(|c| *c != "Uid" && !exclude.contains(c))
            .collect();
        if columns.is_empty() {
            return Err(DbError::InvalidQuery("update_many has nothing to set".into()));
        }

        let mut values = Vec::new();
        let mut assignments = Vec::with_capacity(columns.len());
        for column in &columns {
            let mut case = format!("{column} = CASE");
            for (id, record) in ids.iter().zip(records) {
                if let Some(value) = record.get(column) {
                    case.push_str(" WHEN Uid = ? THEN ?");
                    values.push(SqlValue::Text(id.clone()));
                    values.push(value.clone());
                }
            }
            case.push_str(&format!(" ELSE {column} END"));
            assignments.push(case);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        values.extend(ids.into_iter().map(SqlValue::Text));

        Ok(Query {
            sql: format!(
                "UPDATE {} SET {} WHERE Uid IN ({placeholders}) AND IsDeleted = 0",
                self.table.name,
                assignments.join(", ")
            ),
            values,
        })
    }

    /// Insert-or-update keyed on `unique_key` (default `Uid`).
    ///
    /// The key, `CreatedBy`, `CreatedOn` and `exclude_from_update` are
    /// never overwritten on conflict.
    pub fn upsert_many(
        &self,
        records: &[Record],
        unique_key: Option<&str>,
        exclude_from_update: &[&str],
    ) -> DbResult<Query> {
        let key = self.column(unique_key.unwrap_or("Uid"))?;
        let (columns, values_sql, values) = self.values_block(records, "upsert_many")?;

        let updatable: Vec<&'static str> = columns
            .iter()
            .copied()
            .filter(|c| {
                *c != key && *c != "CreatedBy" && *c != "CreatedOn" && !exclude_from_update.contains(c)
            })
            .collect();

        let insert = format!(
            "INSERT INTO {} ({}) VALUES {values_sql}",
            self.table.name,
            columns.join(", ")
        );

        let sql = match self.dialect {
            Dialect::MySql => {
                let set: Vec<String> = updatable.iter().map(|c| format!("{c} = VALUES({c})")).collect();
                if set.is_empty() {
                    format!("{insert} ON DUPLICATE KEY UPDATE {key} = {key}")
                } else {
                    format!("{insert} ON DUPLICATE KEY UPDATE {}", set.join(", "))
                }
            }
            Dialect::Sqlite => {
                let set: Vec<String> = updatable.iter().map(|c| format!("{c} = excluded.{c}")).collect();
                if set.is_empty() {
                    format!("{insert} ON CONFLICT({key}) DO NOTHING")
                } else {
                    format!("{insert} ON CONFLICT({key}) DO UPDATE SET {}", set.join(", "))
                }
            }
        };

        Ok(Query { sql, values })
    }

    /// Marks one live row deleted. `DeletedOn` is left untouched.
    pub fn soft_delete(&self, id: &str) -> DbResult<Query> {
        Ok(Query::new(format!(
            "UPDATE {} SET IsDeleted = 1 WHERE Uid = ? AND IsDeleted = 0",
            self.table.name
        ))
        .bind(id))
    }

    pub fn soft_delete_many(&self, ids: &[String], deleted_on: DateTime<Utc>) -> DbResult<Query> {
        if ids.is_empty() {
            return Err(DbError::EmptyBatch {
                operation: "soft_delete_many",
            });
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut query = Query::new(format!(
            "UPDATE {} SET IsDeleted = 1, DeletedOn = ? WHERE Uid IN ({placeholders})",
            self.table.name
        ))
        .bind(deleted_on);
        query.values.extend(ids.iter().map(SqlValue::from));
        Ok(query)
    }

    pub fn hard_delete(&self, id: &str) -> DbResult<Query> {
        Ok(Query::new(format!("DELETE FROM {} WHERE Uid = ?", self.table.name)).bind(id))
    }

    pub fn hard_delete_many(&self, ids: &[String]) -> DbResult<Query> {
        if ids.is_empty() {
            return Err(DbError::EmptyBatch {
                operation: "hard_delete_many",
            });
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut query = Query::new(format!(
            "DELETE FROM {} WHERE Uid IN ({placeholders})",
            self.table.name
        ));
        query.values.extend(ids.iter().map(SqlValue::from));
        Ok(query)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn column(&self, name: &str) -> DbResult<&'static str> {
        self.table
            .resolve_column(name)
            .ok_or_else(|| DbError::invalid_identifier(format!("{}.{name}", self.table.name)))
    }

    fn projection(&self, columns: Option<&[&str]>) -> DbResult<String> {
        match columns {
            None | Some([]) => Ok("*".to_string()),
            Some(columns) => {
                let resolved = columns
                    .iter()
                    .map(|c| self.column(c))
                    .collect::<DbResult<Vec<_>>>()?;
                Ok(resolved.join(", "))
            }
        }
    }

    fn checked_columns(&self, record: &Record) -> DbResult<Vec<&'static str>> {
        record
            .columns()
            .map(|c| {
                if self.table.has_column(c) {
                    Ok(c)
                } else {
                    Err(DbError::invalid_identifier(format!("{}.{c}", self.table.name)))
                }
            })
            .collect()
    }

    /// `WHERE IsDeleted = 0 AND OrgId = ?` plus the keyword clause.
    fn push_scope(&self, query: &mut Query, org_id: &str, filter: Option<&Filter>) {
        query.sql.push_str(" WHERE IsDeleted = 0 AND OrgId = ?");
        query.values.push(SqlValue::from(org_id));

        let keyword = filter.and_then(Filter::keyword);
        if let (Some(keyword), false) = (keyword, self.table.search_columns.is_empty()) {
            let pattern = format!("%{keyword}%");
            let clauses: Vec<String> = self
                .table
                .search_columns
                .iter()
                .map(|c| format!("{c} LIKE ?"))
                .collect();
            query.sql.push_str(&format!(" AND ({})", clauses.join(" OR ")));
            for _ in self.table.search_columns {
                query.values.push(SqlValue::Text(pattern.clone()));
            }
        }
    }

    fn values_block(
        &self,
        records: &[Record],
        operation: &'static str,
    ) -> DbResult<(Vec<&'static str>, String, Vec<SqlValue>)> {
        let first = records.first().ok_or(DbError::EmptyBatch { operation })?;
        let columns = self.checked_columns(first)?;
        if columns.is_empty() {
            return Err(DbError::InvalidQuery(format!("{operation} requires at least one column")));
        }

        let row = format!("({})", vec!["?"; columns.len()].join(", "));
        let values_sql = vec![row; records.len()].join(", ");

        let mut values = Vec::with_capacity(columns.len() * records.len());
        for record in records {
            for column in &columns {
                values.push(record.get(column).cloned().unwrap_or(SqlValue::Null));
            }
        }

        Ok((columns, values_sql, values))
    }
}
