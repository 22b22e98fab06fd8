//! # Validation Module
//!
//! Business rule validation helpers used by the service hooks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (serde)                                                 │
//! │  └── Shape: types, required JSON fields                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service hooks (validate_add / validate_update)               │
//! │  └── THIS MODULE: lengths, formats, allowed values                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use roster_core::validation::{validate_email, validate_text};
//!
//! validate_text("name", "Acme Gym", 200).unwrap();
//! assert!(validate_email("email", "not-an-email").is_err());
//! ```

use uuid::Uuid;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `max` characters
pub fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an optional text field: absent is fine, present must fit.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Validates an email address.
///
/// ## Rules
/// - Exactly one `@`, non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace, at most 254 characters
pub fn validate_email(field: &str, email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 254,
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must contain exactly one @ with a local part"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a UUID reference (e.g. `departmentUid`).
pub fn validate_uuid(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Uuid::parse_str(value).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a UUID".to_string(),
    })?;

    Ok(())
}

/// Validates that `value` is one of `allowed`.
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> ValidationResult<()> {
    if allowed.contains(&value) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed.iter().map(|s| s.to_string()).collect(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that `value` lies in `[min, max]`.
pub fn validate_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

/// Minimum password length accepted on account creation.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates a plaintext password before hashing.
///
/// ## Rules
/// - At least 8 characters
/// - At least one letter and one digit
pub fn validate_password(field: &str, password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_letter && has_digit) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert!(validate_text("name", "Acme Gym", 200).is_ok());
        assert!(matches!(
            validate_text("name", "   ", 200),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_text("name", &"x".repeat(201), 200),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_optional_text() {
        assert!(validate_optional_text("notes", None, 10).is_ok());
        assert!(validate_optional_text("notes", Some("short"), 10).is_ok());
        assert!(validate_optional_text("notes", Some("far too long"), 10).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "jane@acme.io").is_ok());
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "jane").is_err());
        assert!(validate_email("email", "@acme.io").is_err());
        assert!(validate_email("email", "jane@acme").is_err());
        assert!(validate_email("email", "jane@@acme.io").is_err());
        assert!(validate_email("email", "ja ne@acme.io").is_err());
        assert!(validate_email("email", "jane@acme.io.").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("departmentUid", &Uuid::new_v4().to_string()).is_ok());
        assert!(validate_uuid("departmentUid", "dept-1").is_err());
        assert!(validate_uuid("departmentUid", "").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("status", "open", &["open", "done"]).is_ok());
        let err = validate_one_of("status", "closed", &["open", "done"]).unwrap_err();
        assert_eq!(err.field(), "status");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("openings", 0, 0, 500).is_ok());
        assert!(validate_range("openings", -1, 0, 500).is_err());
        assert!(validate_range("openings", 501, 0, 500).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password", "hunter22x").is_ok());
        assert!(validate_password("password", "short1").is_err());
        assert!(validate_password("password", "lettersonly").is_err());
        assert!(validate_password("password", "1234567890").is_err());
    }
}
