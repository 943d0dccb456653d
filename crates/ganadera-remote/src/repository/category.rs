//! # Category Repository
//!
//! Reads and inserts against `tipos_ganado`.

use std::sync::Arc;
use tracing::debug;

use crate::error::RemoteResult;
use crate::query::{Direction, SelectQuery, Table};
use crate::repository::{unique_ids, ACTIVE_COLUMN, NAME_COLUMN};
use crate::store::{decode_rows, insert_one, InsertOutcome, TableStore};
use ganadera_core::{LivestockCategory, NewCategory};

#[derive(Clone)]
pub struct CategoryRepository {
    store: Arc<dyn TableStore>,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        CategoryRepository { store }
    }

    /// Active categories, by name ascending.
    pub async fn list_active(&self) -> RemoteResult<Vec<LivestockCategory>> {
        let query = SelectQuery::all()
            .eq(ACTIVE_COLUMN, "true")
            .order_by(NAME_COLUMN, Direction::Asc);

        let rows = self.store.select(Table::Categories, &query).await?;
        let categories: Vec<LivestockCategory> = decode_rows("category", rows)?;
        debug!(count = categories.len(), "Loaded active categories");
        Ok(categories)
    }

    /// Categories with any of `ids`, active or not.
    pub async fn find_by_ids(&self, ids: &[String]) -> RemoteResult<Vec<LivestockCategory>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = SelectQuery::all().in_list("id", ids);
        let rows = self.store.select(Table::Categories, &query).await?;
        decode_rows("category", rows)
    }

    pub async fn insert(&self, new: &NewCategory) -> InsertOutcome<LivestockCategory> {
        debug!(nombre = %new.name, "Inserting category");
        insert_one(self.store.as_ref(), Table::Categories, "category", new).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let repo = CategoryRepository::new(Arc::new(MemoryStore::new()));

        let porcino = repo.insert(&new_category("Porcino")).await.inserted().unwrap();
        repo.insert(&new_category("Bovino")).await.inserted().unwrap();

        assert!(porcino.description.is_none());
        let names: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Bovino", "Porcino"]);
    }

    #[tokio::test]
    async fn test_insert_without_returned_row() {
        let store = MemoryStore::new();
        let repo = CategoryRepository::new(Arc::new(store.clone()));

        store.return_no_row_next();
        let outcome = repo.insert(&new_category("Ovino")).await;
        assert!(matches!(outcome, InsertOutcome::NoRowReturned));
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let store = MemoryStore::new();
        let repo = CategoryRepository::new(Arc::new(store.clone()));

        store.fail_next("permission denied for table tipos_ganado");
        let outcome = repo.insert(&new_category("Caprino")).await;
        assert_eq!(
            outcome.error_message().as_deref(),
            Some("permission denied for table tipos_ganado")
        );

        store.fail_next("timeout");
        assert!(repo.list_active().await.is_err());
    }
}
