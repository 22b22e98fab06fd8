//! # Query Executor
//!
//! Runs [`Query`] values against the pool or a live transaction and maps
//! driver failures through [`DbError::classify`].
//!
//! ## Transactions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  executor.transaction(|tx| async move { ... })                         │
//! │       │                                                                 │
//! │       ├── pool.begin()            ← one pooled connection, held         │
//! │       │                                                                 │
//! │       ├── callback(tx executor)   ← every query uses that connection   │
//! │       │                                                                 │
//! │       ├── Ok  ──► COMMIT                                               │
//! │       └── Err ──► ROLLBACK, error returned unchanged                   │
//! │                                                                         │
//! │  The connection goes back to the pool in every outcome. Calling        │
//! │  transaction() on a transactional executor joins the outer one.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use roster_core::{PaginatedResult, Pagination, MAX_PAGE_SIZE};
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{Arguments, FromRow, Sqlite, SqlitePool, Transaction};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::error::{DbError, DbResult};
use crate::query::Query;
use crate::value::SqlValue;

type TxHandle = Arc<Mutex<Option<Transaction<'static, Sqlite>>>>;

#[derive(Clone)]
enum Conn {
    Pool(SqlitePool),
    Tx(TxHandle),
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationResult {
    pub affected_rows: u64,
    /// SQLite rowid of the last inserted row.
    pub insert_id: i64,
    /// SQLite does not distinguish matched from changed rows.
    pub changed_rows: u64,
}

impl From<SqliteQueryResult> for MutationResult {
    fn from(result: SqliteQueryResult) -> Self {
        MutationResult {
            affected_rows: result.rows_affected(),
            insert_id: result.last_insert_rowid(),
            changed_rows: result.rows_affected(),
        }
    }
}

/// What [`QueryExecutor::execute`] produced.
pub enum ExecOutcome {
    Rows(Vec<SqliteRow>),
    Mutation(MutationResult),
}

impl fmt::Debug for ExecOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecOutcome::Rows(rows) => f.debug_tuple("Rows").field(&rows.len()).finish(),
            ExecOutcome::Mutation(result) => f.debug_tuple("Mutation").field(result).finish(),
        }
    }
}

/// Executes queries on the pool or inside one transaction.
#[derive(Clone)]
pub struct QueryExecutor {
    conn: Conn,
}

impl fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("transactional", &self.is_transactional())
            .finish()
    }
}

/// Runs `$q.$method(conn)` against whichever connection the executor holds.
macro_rules! run_on {
    ($self:ident, $q:ident . $method:ident ()) => {
        match &$self.conn {
            Conn::Pool(pool) => $q.$method(pool).await,
            Conn::Tx(handle) => {
                let mut guard = handle.lock().await;
                let tx = live(&mut guard)?;
                $q.$method(&mut **tx).await
            }
        }
    };
}

impl QueryExecutor {
    pub fn new(pool: SqlitePool) -> Self {
        QueryExecutor {
            conn: Conn::Pool(pool),
        }
    }

    /// True when bound to a live transaction.
    pub fn is_transactional(&self) -> bool {
        matches!(self.conn, Conn::Tx(_))
    }

    /// Runs any statement.
    pub async fn execute(&self, query: &Query) -> DbResult<ExecOutcome> {
        debug!(sql = %query.sql, params = query.values.len(), "execute");
        let verb = query.verb();
        let args = arguments(query)?;
        let q = sqlx::query_with::<Sqlite, _>(&query.sql, args);

        if query.returns_rows() {
            let rows = run_on!(self, q.fetch_all()).map_err(|e| DbError::classify(e, &verb))?;
            Ok(ExecOutcome::Rows(rows))
        } else {
            let result = run_on!(self, q.execute()).map_err(|e| DbError::classify(e, &verb))?;
            Ok(ExecOutcome::Mutation(result.into()))
        }
    }

    /// Runs a SELECT and maps every row.
    pub async fn select<T>(&self, query: &Query) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(sql = %query.sql, params = query.values.len(), "select");
        let args = arguments(query)?;
        let q = sqlx::query_as_with::<Sqlite, T, _>(&query.sql, args);
        run_on!(self, q.fetch_all()).map_err(|e| DbError::classify(e, "SELECT"))
    }

    /// Runs a SELECT and maps the first row, if any.
    pub async fn select_one<T>(&self, query: &Query) -> DbResult<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        debug!(sql = %query.sql, params = query.values.len(), "select_one");
        let args = arguments(query)?;
        let q = sqlx::query_as_with::<Sqlite, T, _>(&query.sql, args);
        run_on!(self, q.fetch_optional()).map_err(|e| DbError::classify(e, "SELECT"))
    }

    /// Runs a `SELECT COUNT(*)`-style query.
    pub async fn scalar_count(&self, query: &Query) -> DbResult<i64> {
        debug!(sql = %query.sql, params = query.values.len(), "count");
        let args = arguments(query)?;
        let q = sqlx::query_scalar_with::<Sqlite, i64, _>(&query.sql, args);
        run_on!(self, q.fetch_one()).map_err(|e| DbError::classify(e, "SELECT"))
    }

    pub async fn insert(&self, query: &Query) -> DbResult<MutationResult> {
        self.mutate(query).await
    }

    pub async fn update(&self, query: &Query) -> DbResult<MutationResult> {
        self.mutate(query).await
    }

    pub async fn delete(&self, query: &Query) -> DbResult<MutationResult> {
        self.mutate(query).await
    }

    async fn mutate(&self, query: &Query) -> DbResult<MutationResult> {
        match self.execute(query).await? {
            ExecOutcome::Mutation(result) => Ok(result),
            ExecOutcome::Rows(_) => Err(DbError::InvalidQuery(format!(
                "expected a mutating statement, got {}",
                query.verb()
            ))),
        }
    }

    /// Counts first, then fetches one page of `base`.
    ///
    /// `base` must not already carry LIMIT/OFFSET.
    pub async fn paginate<T>(
        &self,
        base: &Query,
        count: &Query,
        page: i64,
        limit: i64,
    ) -> DbResult<PaginatedResult<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);

        let total = self.scalar_count(count).await?;
        let paged = base.clone().paged(limit, (page - 1).saturating_mul(limit));
        let data = self.select(&paged).await?;

        Ok(PaginatedResult::new(data, Pagination::new(page, limit, total)))
    }

    /// Runs `f` inside a transaction; see the module docs.
    pub async fn transaction<F, Fut, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(QueryExecutor) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<DbError>,
    {
        let pool = match &self.conn {
            Conn::Tx(_) => {
                debug!("Joining outer transaction");
                return f(self.clone()).await;
            }
            Conn::Pool(pool) => pool,
        };

        let tx = pool
            .begin()
            .await
            .map_err(|e| match e {
                sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
                other => DbError::TransactionFailed(other.to_string()),
            })?;
        debug!("Transaction started");

        let handle: TxHandle = Arc::new(Mutex::new(Some(tx)));
        let result = f(QueryExecutor {
            conn: Conn::Tx(handle.clone()),
        })
        .await;

        let tx = handle.lock().await.take();
        let Some(tx) = tx else {
            return Err(DbError::TransactionFailed("transaction already finished".into()).into());
        };

        match result {
            Ok(value) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
                debug!("Transaction committed");
                Ok(value)
            }
            Err(err) => {
                warn!("Transaction callback failed, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

fn live<'a>(
    slot: &'a mut Option<Transaction<'static, Sqlite>>,
) -> Result<&'a mut Transaction<'static, Sqlite>, sqlx::Error> {
    slot.as_mut()
        .ok_or_else(|| sqlx::Error::Protocol("transaction already finished".into()))
}

fn arguments(query: &Query) -> DbResult<SqliteArguments<'_>> {
    let mut args = SqliteArguments::default();
    for value in &query.values {
        let bound = match value {
            SqlValue::Null => args.add(Option::<String>::None),
            SqlValue::Bool(v) => args.add(*v),
            SqlValue::Int(v) => args.add(*v),
            SqlValue::Float(v) => args.add(*v),
            SqlValue::Text(v) => args.add(v.as_str()),
            SqlValue::Timestamp(v) => args.add(*v),
        };
        bound.map_err(|e| DbError::InvalidQuery(format!("bind failed: {e}")))?;
    }
    Ok(args)
}
