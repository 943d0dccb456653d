//! # Error Types
//!
//! Domain-specific error types for ganadera-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ganadera-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  ganadera-remote errors (separate crate)                               │
//! │  └── RemoteError      - Hosted data service failures                   │
//! │                                                                         │
//! │  Registry app errors                                                   │
//! │  └── ApiError         - What the banner and CLI show                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                         RemoteError ─┴──► ApiError → Banner            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised before anything reaches the remote store.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A form was submitted while its submit action is disabled.
    ///
    /// ## When This Occurs
    /// - A required field (member, category, quantity...) is empty
    /// - The owning operation is still in flight
    #[error("Form cannot be submitted: {0}")]
    SubmitDisabled(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These mirror the native form constraints (`required`, `min`, `step`,
/// `type="email"`); there is no deeper business validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric quantity, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "cedula".to_string(),
        };
        assert_eq!(err.to_string(), "cedula is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999_999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "nombre".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: nombre is required");
    }
}
