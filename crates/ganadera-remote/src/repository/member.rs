//! # Member Repository
//!
//! Reads and inserts against `socios`.

use std::sync::Arc;
use tracing::debug;

use crate::error::RemoteResult;
use crate::query::{Direction, SelectQuery, Table};
use crate::repository::{unique_ids, ACTIVE_COLUMN, NAME_COLUMN};
use crate::store::{decode_rows, insert_one, InsertOutcome, TableStore};
use ganadera_core::{Member, NewMember};

/// Repository for member rows.
///
/// ## Usage
/// ```rust,ignore
/// let members = remote.members().list_active().await?;
/// let outcome = remote.members().insert(&new_member).await;
/// ```
#[derive(Clone)]
pub struct MemberRepository {
    store: Arc<dyn TableStore>,
}

impl MemberRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        MemberRepository { store }
    }

    /// Active members, by first name ascending.
    pub async fn list_active(&self) -> RemoteResult<Vec<Member>> {
        let query = SelectQuery::all()
            .eq(ACTIVE_COLUMN, "true")
            .order_by(NAME_COLUMN, Direction::Asc);

        let rows = self.store.select(Table::Members, &query).await?;
        let members: Vec<Member> = decode_rows("member", rows)?;
        debug!(count = members.len(), "Loaded active members");
        Ok(members)
    }

    /// Members with any of `ids`, active or not.
    pub async fn find_by_ids(&self, ids: &[String]) -> RemoteResult<Vec<Member>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = SelectQuery::all().in_list("id", ids);
        let rows = self.store.select(Table::Members, &query).await?;
        decode_rows("member", rows)
    }

    /// Inserts one member and returns the stored row.
    pub async fn insert(&self, new: &NewMember) -> InsertOutcome<Member> {
        debug!(cedula = %new.national_id, "Inserting member");
        insert_one(self.store.as_ref(), Table::Members, "member", new).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::Utc;
    use serde_json::json;

    fn new_member(name: &str, cedula: &str) -> NewMember {
        NewMember {
            first_name: name.to_string(),
            last_name: "Rojas".to_string(),
            national_id: cedula.to_string(),
            phone: "2222-3333".to_string(),
            address: "Liberia".to_string(),
            email: None,
            registered_at: Utc::now(),
            active: true,
        }
    }

    #[tokio::test]
    async fn test_list_active_excludes_inactive_and_sorts() {
        let store = MemoryStore::new();
        let repo = MemberRepository::new(Arc::new(store.clone()));

        repo.insert(&new_member("Marta", "1")).await.inserted().unwrap();
        repo.insert(&new_member("Beto", "2")).await.inserted().unwrap();
        store.put(
            Table::Members,
            json!({
                "nombre": "Aaron", "apellido": "Viejo", "cedula": "3",
                "telefono": "0", "direccion": "-", "activo": false
            }),
        );

        let members = repo.list_active().await.unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.first_name.as_str()).collect();
        assert_eq!(names, vec!["Beto", "Marta"]);
        assert!(members.iter().all(|m| m.active));
    }

    #[tokio::test]
    async fn test_find_by_ids_ignores_active_flag() {
        let store = MemoryStore::new();
        let repo = MemberRepository::new(Arc::new(store.clone()));

        let stored = store.put(
            Table::Members,
            json!({
                "nombre": "Aaron", "apellido": "Viejo", "cedula": "3",
                "telefono": "0", "direccion": "-", "activo": false
            }),
        );
        let id = stored["id"].as_str().unwrap().to_string();

        let found = repo.find_by_ids(&[id.clone(), id]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(!found[0].active);

        let calls = store.calls();
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
        assert_eq!(store.calls(), calls);
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let repo = MemberRepository::new(Arc::new(MemoryStore::new()));
        let member = repo.insert(&new_member("Ana", "9")).await.inserted().unwrap();

        assert!(!member.id.is_empty());
        assert!(member.active);
        assert!(member.registered_at.is_some());
    }
}
