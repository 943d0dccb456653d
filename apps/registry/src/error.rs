//! # API Error Type
//!
//! Unified error type for registry commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Ganadera Registry                      │
//! │                                                                         │
//! │  ganadera members add ...                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Form gate? ─── CoreError::SubmitDisabled ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Remote Error? ─── RemoteError::Service ──────── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Error: [ServiceError] duplicate key value violates unique constraint   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages coming from the hosted service are shown unchanged.

use serde::Serialize;
use tracing::error;

use ganadera_core::{CoreError, ValidationError};
use ganadera_remote::store::NO_ROW_RETURNED;
use ganadera_remote::{ConfigError, InsertOutcome, RemoteError};

/// Error returned from registry commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DUPLICATE_VALUE",
///   "message": "duplicate key value violates unique constraint \"socios_cedula_key\""
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced row not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The service answered with an error status
    ServiceError,

    /// Unique constraint violation (repeated cédula)
    DuplicateValue,

    /// Foreign key violation
    InvalidReference,

    /// The service could not be reached
    ConnectionError,

    /// Missing or malformed endpoint settings
    ConfigError,

    /// Insert accepted but nothing came back
    NoRowReturned,

    /// Submit action is disabled
    SubmitDisabled,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn no_row_returned() -> Self {
        ApiError::new(ErrorCode::NoRowReturned, NO_ROW_RETURNED)
    }

    /// Unwraps an insert outcome, turning both failure arms into errors.
    pub fn from_outcome<T>(outcome: InsertOutcome<T>) -> Result<T, ApiError> {
        match outcome {
            InsertOutcome::Inserted(row) => Ok(row),
            InsertOutcome::NoRowReturned => Err(ApiError::no_row_returned()),
            InsertOutcome::ServiceError(err) => Err(err.into()),
        }
    }
}

impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Config(e) => e.into(),
            RemoteError::Transport(message) => {
                ApiError::new(ErrorCode::ConnectionError, message)
            }
            RemoteError::Service {
                status,
                code,
                message,
                ..
            } => {
                error!(status, code = ?code, "Service error: {}", message);
                ApiError::new(ErrorCode::ServiceError, message)
            }
            RemoteError::UniqueViolation { message } => {
                ApiError::new(ErrorCode::DuplicateValue, message)
            }
            RemoteError::ForeignKeyViolation { message } => {
                ApiError::new(ErrorCode::InvalidReference, message)
            }
            e @ RemoteError::Decode { .. } => {
                error!("Decode failure: {}", e);
                ApiError::internal(e.to_string())
            }
            RemoteError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SubmitDisabled(reason) => ApiError::new(
                ErrorCode::SubmitDisabled,
                format!("Cannot submit: {}", reason),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
