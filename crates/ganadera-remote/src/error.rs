//! # Remote Error Types
//!
//! Error types for calls to the hosted data service.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / PostgREST error body / serde_json::Error             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RemoteError (this module) ← Adds categorization                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (registry app) ← What the banner shows                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Postgres SQLSTATE for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

// =============================================================================
// Remote Error
// =============================================================================

/// Remote data service errors.
///
/// Service-side variants display the message the service sent, unchanged.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Endpoint settings are missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request never produced an HTTP response.
    ///
    /// ## When This Occurs
    /// - DNS or TLS failure
    /// - Connection refused or reset
    /// - Configured request timeout elapsed
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with an error status.
    #[error("{message}")]
    Service {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// Unique constraint violation (e.g. a repeated cédula).
    #[error("{message}")]
    UniqueViolation { message: String },

    /// Foreign key violation (unknown socio_id or tipo_ganado_id).
    #[error("{message}")]
    ForeignKeyViolation { message: String },

    /// A row came back in a shape the domain types cannot read.
    #[error("Could not decode {entity}: {message}")]
    Decode { entity: String, message: String },

    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

impl RemoteError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        RemoteError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn decode(entity: impl Into<String>, err: impl std::fmt::Display) -> Self {
        RemoteError::Decode {
            entity: entity.into(),
            message: err.to_string(),
        }
    }

    /// Generic service error with just a status and message.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        RemoteError::Service {
            status,
            code: None,
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    /// Maps a PostgREST error body to the matching variant.
    ///
    /// ## Error Mapping
    /// ```text
    /// code 23505   → RemoteError::UniqueViolation
    /// code 23503   → RemoteError::ForeignKeyViolation
    /// anything else → RemoteError::Service
    /// ```
    pub fn from_body(status: u16, body: ServiceErrorBody) -> Self {
        match body.code.as_deref() {
            Some(UNIQUE_VIOLATION) => RemoteError::UniqueViolation {
                message: body.message,
            },
            Some(FOREIGN_KEY_VIOLATION) => RemoteError::ForeignKeyViolation {
                message: body.message,
            },
            _ => RemoteError::Service {
                status,
                code: body.code,
                message: body.message,
                details: body.details,
                hint: body.hint,
            },
        }
    }

    /// True for failures where the service was never reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, RemoteError::Transport(_) | RemoteError::Config(_))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::decode("response", err)
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::decode("row", err)
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

// =============================================================================
// Config Error
// =============================================================================

/// Endpoint configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting is absent from every layer.
    #[error("Missing {0}: set it in the environment, a .env file or config.toml")]
    Missing(&'static str),

    #[error("Invalid service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Could not read {path}: {reason}")]
    File { path: String, reason: String },
}

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;
