//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError::classify(err, verb) ← duplicate / FK / other                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError::Db (unchanged)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError ← status_code() + code() become the HTTP envelope            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification
//! ```text
//! ┌───────────────────────────────┬──────────────────────────────┬────────┐
//! │ Driver failure                │ DbError                      │ Status │
//! ├───────────────────────────────┼──────────────────────────────┼────────┤
//! │ unique violation / 1062       │ DuplicateEntry               │ 409    │
//! │ FK, parent missing / 1452     │ ForeignKey(MissingReference) │ 400    │
//! │ FK, row still used / 1451     │ ForeignKey(StillReferenced)  │ 409    │
//! │ row not found                 │ NotFound                     │ 404    │
//! │ pool timed out                │ PoolExhausted                │ 500    │
//! │ anything else                 │ Database                     │ 500    │
//! └───────────────────────────────┴──────────────────────────────┴────────┘
//! ```
//!
//! SQLite reports both FK directions with one code, so the statement verb
//! decides: a failing DELETE means the row is still referenced, anything
//! else means the referenced parent is missing.

use sqlx::error::ErrorKind;
use std::fmt;
use thiserror::Error;

/// Which side of a foreign key broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyReason {
    /// The row points at a parent that does not exist.
    MissingReference,
    /// The row cannot be removed because children point at it.
    StillReferenced,
}

impl fmt::Display for ForeignKeyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForeignKeyReason::MissingReference => f.write_str("referenced record does not exist"),
            ForeignKeyReason::StillReferenced => {
                f.write_str("record is still referenced by other records")
            }
        }
    }
}

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `fetch_one` returns no rows
    /// - Update refresh after the row vanished
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate Uid
    /// - Two users with the same email in one tenant
    #[error("Duplicate entry: {message}")]
    DuplicateEntry { message: String },

    /// Foreign key constraint violation.
    #[error("Foreign key constraint failed ({reason}): {message}")]
    ForeignKeyConstraint {
        reason: ForeignKeyReason,
        message: String,
    },

    /// A batch operation received no rows.
    #[error("Empty batch: {operation} requires at least one record")]
    EmptyBatch { operation: &'static str },

    /// A table or column name outside the registry.
    #[error("Invalid identifier: {identifier}")]
    InvalidIdentifier { identifier: String },

    /// Query could not be built or bound.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Any other driver failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Transaction could not begin, commit, or was already finished.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an InvalidIdentifier error.
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        DbError::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Maps a driver failure to a domain error.
    ///
    /// `verb` is the leading SQL keyword of the failing statement
    /// (`"INSERT"`, `"DELETE"`, ...). It only matters for SQLite foreign
    /// key failures.
    pub fn classify(err: sqlx::Error, verb: &str) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                let code = db_err.code().map(|c| c.into_owned());

                match (db_err.kind(), code.as_deref()) {
                    (ErrorKind::UniqueViolation, _) | (_, Some("1062")) => {
                        DbError::DuplicateEntry { message }
                    }
                    (_, Some("1452")) => DbError::ForeignKeyConstraint {
                        reason: ForeignKeyReason::MissingReference,
                        message,
                    },
                    (_, Some("1451")) => DbError::ForeignKeyConstraint {
                        reason: ForeignKeyReason::StillReferenced,
                        message,
                    },
                    (ErrorKind::ForeignKeyViolation, _) => {
                        let reason = if verb.eq_ignore_ascii_case("DELETE") {
                            ForeignKeyReason::StillReferenced
                        } else {
                            ForeignKeyReason::MissingReference
                        };
                        DbError::ForeignKeyConstraint { reason, message }
                    }
                    _ => DbError::Database(message),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            other => DbError::Database(other.to_string()),
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            DbError::NotFound { .. } => 404,
            DbError::DuplicateEntry { .. } => 409,
            DbError::ForeignKeyConstraint { reason, .. } => match reason {
                ForeignKeyReason::MissingReference => 400,
                ForeignKeyReason::StillReferenced => 409,
            },
            DbError::EmptyBatch { .. } | DbError::InvalidIdentifier { .. } => 400,
            _ => 500,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DbError::NotFound { .. } => "NOT_FOUND",
            DbError::DuplicateEntry { .. } => "DUPLICATE_ENTRY",
            DbError::ForeignKeyConstraint { .. } => "FOREIGN_KEY_CONSTRAINT",
            DbError::EmptyBatch { .. } => "EMPTY_BATCH",
            DbError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            DbError::PoolExhausted => "POOL_EXHAUSTED",
            _ => "DATABASE_ERROR",
        }
    }
}

/// Convert sqlx errors to DbError when the statement verb is unknown.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::classify(err, "")
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
