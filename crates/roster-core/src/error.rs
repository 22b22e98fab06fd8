//! # Error Types
//!
//! Domain-specific error types for roster-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  roster-core errors (this file)                                        │
//! │  └── ValidationError  - Business rule failures on input                │
//! │                                                                         │
//! │  roster-db errors                                                      │
//! │  └── DbError          - Driver failures, classified                    │
//! │                                                                         │
//! │  roster-service errors                                                 │
//! │  └── ServiceError     - What controllers translate to HTTP             │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → ApiError → JSON envelope       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the service-layer `validate_add` / `validate_update` hooks.
/// Shape checks happen before the request reaches a service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., email already registered in the tenant).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A referenced entity does not exist in the caller's tenant.
    #[error("{field} references an unknown {entity}: {id}")]
    UnknownReference {
        field: String,
        entity: String,
        id: String,
    },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::TooShort { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::Duplicate { field, .. }
            | ValidationError::UnknownReference { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
        assert_eq!(err.field(), "name");

        let err = ValidationError::UnknownReference {
            field: "departmentUid".to_string(),
            entity: "Department".to_string(),
            id: "d-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "departmentUid references an unknown Department: d-1"
        );
    }
}
