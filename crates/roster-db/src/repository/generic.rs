//! # Generic Repository
//!
//! CRUD for any [`Entity`], built from one [`QueryGenerator`] and one
//! [`QueryExecutor`]. Holds no state besides that pair.
//!
//! ## Visibility Rules
//! ```text
//! ┌──────────────────────────┬──────────┬──────────────┬──────────────────┐
//! │ Method                   │ Tenant   │ Soft-deleted │ Used by          │
//! ├──────────────────────────┼──────────┼──────────────┼──────────────────┤
//! │ find_by_id / find_all    │ scoped   │ hidden       │ reads            │
//! │ find_list / count        │ scoped   │ hidden       │ reads            │
//! │ find_by_id_any_tenant    │ any      │ hidden       │ update ownership │
//! │ find_raw                 │ any      │ visible      │ admin / hard del │
//! └──────────────────────────┴──────────┴──────────────┴──────────────────┘
//! ```

use std::marker::PhantomData;

use chrono::Utc;
use roster_core::{Filter, PaginatedResult};
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;
use tracing::debug;

use crate::entity::Entity;
use crate::error::{DbError, DbResult};
use crate::executor::QueryExecutor;
use crate::query::{Dialect, QueryGenerator};

/// Columns an update never writes. `Uid` is handled by the generator;
/// the soft-delete state belongs to the delete paths.
const NON_UPDATABLE_COLUMNS: &[&str] = &["OrgId", "CreatedBy", "CreatedOn", "IsDeleted", "DeletedOn"];

/// Result of a single-row insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// Uid of the inserted row.
    pub insert_id: String,
    pub affected_rows: u64,
}

/// Generic repository over one entity type.
pub struct Repository<E: Entity> {
    generator: QueryGenerator,
    executor: QueryExecutor,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Repository {
            generator: self.generator,
            executor: self.executor.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &self.generator.table().name)
            .field("executor", &self.executor)
            .finish()
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(executor: QueryExecutor, dialect: Dialect) -> Self {
        Repository {
            generator: QueryGenerator::with_dialect(E::table(), dialect),
            executor,
            _entity: PhantomData,
        }
    }

    pub fn generator(&self) -> &QueryGenerator {
        &self.generator
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Inserts one fully stamped entity.
    pub async fn create(&self, entity: &E) -> DbResult<InsertResult> {
        let query = self.generator.insert(&entity.to_record())?;
        let result = self.executor.insert(&query).await?;

        debug!(entity = E::NAME, uid = %entity.uid(), "Inserted");

        Ok(InsertResult {
            insert_id: entity.uid().to_string(),
            affected_rows: result.affected_rows,
        })
    }

    /// Inserts every entity in one statement.
    pub async fn create_many(&self, entities: &[E]) -> DbResult<u64> {
        let records: Vec<_> = entities.iter().map(Entity::to_record).collect();
        let query = self.generator.insert_many(&records)?;
        Ok(self.executor.insert(&query).await?.affected_rows)
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Non-deleted row owned by `org_id`. Other tenants' rows read as `None`.
    pub async fn find_by_id(&self, id: &str, org_id: &str) -> DbResult<Option<E>> {
        let query = self.generator.select_by_id(org_id, id, None)?;
        self.executor.select_one(&query).await
    }

    /// Like [`find_by_id`](Self::find_by_id) with a column projection.
    pub async fn find_by_id_as<T>(&self, id: &str, org_id: &str, columns: &[&str]) -> DbResult<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let query = self.generator.select_by_id(org_id, id, Some(columns))?;
        self.executor.select_one(&query).await
    }

    /// Non-deleted row regardless of tenant.
    pub async fn find_by_id_any_tenant(&self, id: &str) -> DbResult<Option<E>> {
        let query = self.generator.select_by_id_any_tenant(id)?;
        self.executor.select_one(&query).await
    }

    /// Row regardless of tenant or soft-delete state.
    pub async fn find_raw(&self, id: &str) -> DbResult<Option<E>> {
        let query = self.generator.select_raw_by_id(id)?;
        self.executor.select_one(&query).await
    }

    pub async fn find_all(&self, org_id: &str) -> DbResult<Vec<E>> {
        let query = self.generator.select_all(org_id, None, None)?;
        self.executor.select(&query).await
    }

    /// All rows of the tenant, projected to `columns`.
    pub async fn find_all_as<T>(&self, org_id: &str, columns: &[&str]) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let query = self.generator.select_all(org_id, Some(columns), None)?;
        self.executor.select(&query).await
    }

    /// One page of the tenant's rows, with search and sort applied.
    pub async fn find_list(&self, org_id: &str, filter: &Filter) -> DbResult<PaginatedResult<E>> {
        let unpaged = filter.without_paging();
        let base = self.generator.select_all(org_id, None, Some(&unpaged))?;
        let count = self.generator.count(org_id, Some(&unpaged))?;

        self.executor
            .paginate(
                &base,
                &count,
                filter.effective_page(),
                filter.effective_page_size(),
            )
            .await
    }

    pub async fn exists(&self, id: &str, org_id: &str) -> DbResult<bool> {
        let row: Option<(String,)> = self.find_by_id_as(id, org_id, &["Uid"]).await?;
        Ok(row.is_some())
    }

    pub async fn count(&self, org_id: &str) -> DbResult<i64> {
        let query = self.generator.count(org_id, None)?;
        self.executor.scalar_count(&query).await
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Writes every mutable column and returns the row as stored.
    ///
    /// `OrgId`, `CreatedBy`, `CreatedOn` and the soft-delete state are never
    /// written. A soft-deleted row reads as `NotFound`.
    pub async fn update(&self, id: &str, entity: &E) -> DbResult<E> {
        let record = entity.to_record().without(NON_UPDATABLE_COLUMNS);
        let query = self.generator.update(id, &record)?;
        let result = self.executor.update(&query).await?;

        if result.affected_rows == 0 {
            return Err(DbError::not_found(E::NAME, id));
        }

        debug!(entity = E::NAME, uid = %id, "Updated");

        self.find_raw(id)
            .await?
            .ok_or_else(|| DbError::not_found(E::NAME, id))
    }

    /// Bulk update via CASE expressions; every entity must carry its Uid.
    /// Soft-deleted rows are skipped and not counted.
    pub async fn update_many(&self, entities: &[E], exclude: &[&str]) -> DbResult<u64> {
        let records: Vec<_> = entities
            .iter()
            .map(|e| e.to_record().without(NON_UPDATABLE_COLUMNS))
            .collect();
        let query = self.generator.update_many(&records, exclude)?;
        Ok(self.executor.update(&query).await?.affected_rows)
    }

    /// Insert-or-update keyed on `unique_key` (default `Uid`).
    ///
    /// On conflict `OrgId`, `CreatedBy`, `CreatedOn`, the soft-delete state,
    /// the key and `exclude_from_update` keep their stored values.
    pub async fn upsert_many(
        &self,
        entities: &[E],
        unique_key: Option<&str>,
        exclude_from_update: &[&str],
    ) -> DbResult<u64> {
        let records: Vec<_> = entities.iter().map(Entity::to_record).collect();
        let mut exclude: Vec<&str> = exclude_from_update.to_vec();
        exclude.extend(["OrgId", "IsDeleted", "DeletedOn"]);

        let query = self.generator.upsert_many(&records, unique_key, &exclude)?;
        Ok(self.executor.insert(&query).await?.affected_rows)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Marks the row deleted. Returns false if no live row matched.
    pub async fn soft_delete(&self, id: &str) -> DbResult<bool> {
        let query = self.generator.soft_delete(id)?;
        let affected = self.executor.update(&query).await?.affected_rows;
        debug!(entity = E::NAME, uid = %id, affected, "Soft deleted");
        Ok(affected > 0)
    }

    /// Marks rows deleted and stamps `DeletedOn`.
    pub async fn soft_delete_many(&self, ids: &[String]) -> DbResult<u64> {
        let query = self.generator.soft_delete_many(ids, Utc::now())?;
        Ok(self.executor.update(&query).await?.affected_rows)
    }

    /// Removes the row. Returns false if no row matched.
    pub async fn hard_delete(&self, id: &str) -> DbResult<bool> {
        let query = self.generator.hard_delete(id)?;
        let affected = self.executor.delete(&query).await?.affected_rows;
        debug!(entity = E::NAME, uid = %id, affected, "Hard deleted");
        Ok(affected > 0)
    }

    pub async fn hard_delete_many(&self, ids: &[String]) -> DbResult<u64> {
        let query = self.generator.hard_delete_many(ids)?;
        Ok(self.executor.delete(&query).await?.affected_rows)
    }
}
