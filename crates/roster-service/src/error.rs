//! Service errors.
//!
//! Database errors pass through untouched in [`ServiceError::Db`]; the API
//! layer is the single place that turns any of these into an HTTP status.

use roster_core::ValidationError;
use roster_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Absent, soft-deleted, or owned by another tenant.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Write against another tenant's row.
    #[error("{0}")]
    Forbidden(String),

    /// Bad or missing credentials.
    #[error("{0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// Failure outside the database (hashing, notifications).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// The tenant-mismatch error every write path returns.
    pub fn forbidden() -> Self {
        ServiceError::Forbidden("Not authorized".to_string())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 404,
            ServiceError::Forbidden(_) => 403,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::Validation(_) => 400,
            ServiceError::Db(err) => err.status_code(),
            ServiceError::Internal(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Forbidden(_) => "FORBIDDEN",
            ServiceError::Unauthorized(_) => "UNAUTHORIZED",
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Db(err) => err.code(),
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
