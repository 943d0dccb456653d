//! # In-Memory Store
//!
//! A [`TableStore`] kept in process. Used by the test suites and by the
//! CLI's `--offline` mode.
//!
//! Behaves like the service for what the registry relies on: ids are
//! assigned on insert, inserts echo the stored row, reads honour filters,
//! ordering and limits. Failures can be scripted:
//!
//! ```rust,ignore
//! let store = MemoryStore::new();
//! store.fail_next("network down");
//! assert!(store.select(Table::Members, &SelectQuery::all()).await.is_err());
//! assert!(store.select(Table::Members, &SelectQuery::all()).await.is_ok());
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

use crate::error::{RemoteError, RemoteResult};
use crate::query::{SelectQuery, Table};
use crate::store::TableStore;

/// A scripted answer consumed by the next call.
#[derive(Debug, Clone)]
enum Scripted {
    Fail(String),
    EmptyInsert,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<Table, Vec<Value>>,
    script: VecDeque<Scripted>,
    calls: usize,
}

/// In-process tables. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Puts a row in `table` as-is. Adds an `id` if the row has none.
    pub fn put(&self, table: Table, mut row: Value) -> Value {
        if let Value::Object(map) = &mut row {
            map.entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        }
        self.lock().tables.entry(table).or_default().push(row.clone());
        row
    }

    /// Every stored row of `table`, in insertion order.
    pub fn rows(&self, table: Table) -> Vec<Value> {
        self.lock().tables.get(&table).cloned().unwrap_or_default()
    }

    /// The next call (select or insert) fails with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().script.push_back(Scripted::Fail(message.into()));
    }

    /// The next insert stores nothing and answers with zero rows.
    pub fn return_no_row_next(&self) {
        self.lock().script.push_back(Scripted::EmptyInsert);
    }

    /// Number of calls served so far.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: Table, query: &SelectQuery) -> RemoteResult<Vec<Value>> {
        let mut inner = self.lock();
        inner.calls += 1;

        if matches!(inner.script.front(), Some(Scripted::Fail(_))) {
            if let Some(Scripted::Fail(message)) = inner.script.pop_front() {
                return Err(RemoteError::service(503, message));
            }
        }

        let rows = inner.tables.get(&table).cloned().unwrap_or_default();
        let rows = query.apply(rows);
        debug!(%table, count = rows.len(), "Memory select");
        Ok(rows)
    }

    async fn insert(&self, table: Table, mut row: Value) -> RemoteResult<Vec<Value>> {
        let mut inner = self.lock();
        inner.calls += 1;

        match inner.script.pop_front() {
            Some(Scripted::Fail(message)) => return Err(RemoteError::service(400, message)),
            Some(Scripted::EmptyInsert) => return Ok(Vec::new()),
            None => {}
        }

        let Value::Object(map) = &mut row else {
            return Err(RemoteError::service(400, "insert body must be an object"));
        };
        map.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));

        inner.tables.entry(table).or_default().push(row.clone());
        debug!(%table, "Memory insert");
        Ok(vec![row])
    }
}
