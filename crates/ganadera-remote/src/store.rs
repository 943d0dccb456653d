//! # Table Store Seam
//!
//! The async trait every repository talks to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemberRepository / CategoryRepository / TransactionRepository         │
//! │                           │                                             │
//! │                  Arc<dyn TableStore>                                    │
//! │                    │              │                                     │
//! │          ┌─────────▼───┐   ┌──────▼───────┐                            │
//! │          │ RestClient  │   │ MemoryStore  │                            │
//! │          │ (PostgREST) │   │ (tests,      │                            │
//! │          │             │   │  --offline)  │                            │
//! │          └─────────────┘   └──────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows cross the seam as `serde_json::Value` so the trait stays object safe;
//! repositories decode them into domain types.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RemoteError, RemoteResult};
use crate::query::{SelectQuery, Table};

/// Read and insert access to the remote tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Runs a filtered, ordered read.
    async fn select(&self, table: Table, query: &SelectQuery) -> RemoteResult<Vec<Value>>;

    /// Inserts one row and returns what the store sent back.
    ///
    /// The service may legitimately answer with zero rows.
    async fn insert(&self, table: Table, row: Value) -> RemoteResult<Vec<Value>>;
}

/// Result of a single-row insert.
///
/// `NoRowReturned` is a success at the transport level that still produced
/// nothing to show, so callers treat it apart from a service error.
#[derive(Debug)]
pub enum InsertOutcome<T> {
    Inserted(T),
    NoRowReturned,
    ServiceError(RemoteError),
}

impl<T> InsertOutcome<T> {
    pub fn inserted(self) -> Option<T> {
        match self {
            InsertOutcome::Inserted(row) => Some(row),
            _ => None,
        }
    }

    /// Message for the banner, if this outcome is a failure.
    pub fn error_message(&self) -> Option<String> {
        match self {
            InsertOutcome::Inserted(_) => None,
            InsertOutcome::NoRowReturned => Some(NO_ROW_RETURNED.to_string()),
            InsertOutcome::ServiceError(err) => Some(err.to_string()),
        }
    }
}

pub const NO_ROW_RETURNED: &str = "The service accepted the insert but returned no row";

/// Decodes store rows into `T`, naming `entity` on failure.
pub fn decode_rows<T: DeserializeOwned>(entity: &str, rows: Vec<Value>) -> RemoteResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| RemoteError::decode(entity, e)))
        .collect()
}

/// Encodes an insert payload and turns the store's answer into an outcome.
pub async fn insert_one<N, T>(
    store: &dyn TableStore,
    table: Table,
    entity: &str,
    new: &N,
) -> InsertOutcome<T>
where
    N: serde::Serialize + Sync,
    T: DeserializeOwned,
{
    let row = match serde_json::to_value(new) {
        Ok(row) => row,
        Err(e) => return InsertOutcome::ServiceError(RemoteError::decode(entity, e)),
    };

    match store.insert(table, row).await {
        Ok(rows) => match rows.into_iter().next() {
            None => InsertOutcome::NoRowReturned,
            Some(row) => match serde_json::from_value(row) {
                Ok(inserted) => InsertOutcome::Inserted(inserted),
                Err(e) => InsertOutcome::ServiceError(RemoteError::decode(entity, e)),
            },
        },
        Err(err) => InsertOutcome::ServiceError(err),
    }
}
