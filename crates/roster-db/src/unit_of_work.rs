//! # Unit of Work
//!
//! Request-scoped entry point to the data layer. Hands out repositories
//! bound to one executor and runs transactional callbacks.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  let uow = db.unit_of_work();                                          │
//! │                                                                         │
//! │  uow.transaction(|tx| async move {                                     │
//! │      tx.repository::<Department>().create(&dept).await?;               │
//! │      tx.repository::<Position>().create(&pos).await?;   ← same commit  │
//! │      Ok::<_, DbError>(())                                              │
//! │  }).await?;                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories are built on demand; they are two words wide and carry no
//! entity state, so nothing is cached.

use std::future::Future;

use sqlx::SqlitePool;

use crate::entity::Entity;
use crate::error::{DbError, DbResult};
use crate::executor::QueryExecutor;
use crate::query::{Dialect, QueryGenerator};
use crate::repository::generic::Repository;
use crate::schema::{self, Table};

#[derive(Debug, Clone)]
pub struct UnitOfWork {
    executor: QueryExecutor,
    dialect: Dialect,
}

impl UnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        UnitOfWork {
            executor: QueryExecutor::new(pool),
            dialect: Dialect::Sqlite,
        }
    }

    /// Repository for `E` bound to this unit's executor.
    pub fn repository<E: Entity>(&self) -> Repository<E> {
        Repository::new(self.executor.clone(), self.dialect)
    }

    /// Resolves a logical entity name or physical table name.
    pub fn table(&self, name: &str) -> DbResult<&'static Table> {
        schema::lookup(name).ok_or_else(|| DbError::invalid_identifier(name))
    }

    /// Query generator for a table looked up by name.
    pub fn generator(&self, name: &str) -> DbResult<QueryGenerator> {
        Ok(QueryGenerator::with_dialect(self.table(name)?, self.dialect))
    }

    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    /// True inside a [`transaction`](Self::transaction) callback.
    pub fn is_transactional(&self) -> bool {
        self.executor.is_transactional()
    }

    /// Runs `f` with a unit bound to one transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back and returns the error
    /// otherwise. Nested calls join the outer transaction.
    pub async fn transaction<F, Fut, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(UnitOfWork) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<DbError>,
    {
        let dialect = self.dialect;
        self.executor
            .transaction(move |executor| f(UnitOfWork { executor, dialect }))
            .await
    }
}
