//! # Transaction Repository
//!
//! Reads and inserts against `registros`, and the join that attaches the
//! referenced member and category to each row.
//!
//! ## Explicit Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows: [Transaction { socio_id: m1, tipo_ganado_id: c1 }, ...]         │
//! │       │                                                                 │
//! │       ├── ids already known (loaded collections) ── resolved locally   │
//! │       │                                                                 │
//! │       └── unknown ids ──► tokio::join!(                                │
//! │                              members.find_by_ids(..),                   │
//! │                              categories.find_by_ids(..))                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EnrichedTransaction { member: Found(..) | Missing(id),                │
//! │                        category: Found(..) | Missing(id) }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups ignore the active flag: a row pointing at a deactivated member
//! still shows the member's name.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::RemoteResult;
use crate::query::{Direction, SelectQuery, Table};
use crate::repository::{CategoryRepository, MemberRepository, REGISTERED_AT_COLUMN};
use crate::store::{decode_rows, insert_one, InsertOutcome, TableStore};
use ganadera_core::{
    EnrichedTransaction, LivestockCategory, Member, NewTransaction, Related, Transaction,
};

#[derive(Clone)]
pub struct TransactionRepository {
    store: Arc<dyn TableStore>,
    members: MemberRepository,
    categories: CategoryRepository,
}

impl TransactionRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        TransactionRepository {
            members: MemberRepository::new(store.clone()),
            categories: CategoryRepository::new(store.clone()),
            store,
        }
    }

    /// Every transaction, newest first.
    pub async fn list_recent(&self) -> RemoteResult<Vec<Transaction>> {
        let query = SelectQuery::all().order_by(REGISTERED_AT_COLUMN, Direction::Desc);
        let rows = self.store.select(Table::Transactions, &query).await?;
        let transactions: Vec<Transaction> = decode_rows("transaction", rows)?;
        debug!(count = transactions.len(), "Loaded transactions");
        Ok(transactions)
    }

    /// Transactions of one member, newest first.
    pub async fn list_for_member(&self, member_id: &str) -> RemoteResult<Vec<Transaction>> {
        let query = SelectQuery::all()
            .eq("socio_id", member_id)
            .order_by(REGISTERED_AT_COLUMN, Direction::Desc);
        let rows = self.store.select(Table::Transactions, &query).await?;
        decode_rows("transaction", rows)
    }

    pub async fn insert(&self, new: &NewTransaction) -> InsertOutcome<Transaction> {
        debug!(
            socio_id = %new.member_id,
            tipo_ganado_id = %new.category_id,
            cantidad = new.quantity,
            "Inserting transaction"
        );
        insert_one(self.store.as_ref(), Table::Transactions, "transaction", new).await
    }

    /// Newest-first transactions with their member and category attached.
    pub async fn list_recent_enriched(&self) -> RemoteResult<Vec<EnrichedTransaction>> {
        let rows = self.list_recent().await?;
        self.enrich(rows).await
    }

    /// Attaches member and category to each row with two id lookups.
    pub async fn enrich(&self, rows: Vec<Transaction>) -> RemoteResult<Vec<EnrichedTransaction>> {
        self.enrich_with(rows, &[], &[]).await
    }

    /// Like [`enrich`](Self::enrich), but resolves from `known_members` and
    /// `known_categories` first and only fetches ids not found there.
    pub async fn enrich_with(
        &self,
        rows: Vec<Transaction>,
        known_members: &[Member],
        known_categories: &[LivestockCategory],
    ) -> RemoteResult<Vec<EnrichedTransaction>> {
        let mut members: HashMap<String, Member> = known_members
            .iter()
            .map(|m| (m.id.clone(), m.clone()))
            .collect();
        let mut categories: HashMap<String, LivestockCategory> = known_categories
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();

        let missing_members: Vec<String> = rows
            .iter()
            .map(|r| r.member_id.clone())
            .filter(|id| !members.contains_key(id))
            .collect();
        let missing_categories: Vec<String> = rows
            .iter()
            .map(|r| r.category_id.clone())
            .filter(|id| !categories.contains_key(id))
            .collect();

        let (fetched_members, fetched_categories) = tokio::join!(
            self.members.find_by_ids(&missing_members),
            self.categories.find_by_ids(&missing_categories),
        );
        members.extend(fetched_members?.into_iter().map(|m| (m.id.clone(), m)));
        categories.extend(fetched_categories?.into_iter().map(|c| (c.id.clone(), c)));

        let enriched: Vec<EnrichedTransaction> = rows
            .into_iter()
            .map(|transaction| {
                let member = match members.get(&transaction.member_id) {
                    Some(m) => Related::Found(m.clone()),
                    None => Related::Missing(transaction.member_id.clone()),
                };
                let category = match categories.get(&transaction.category_id) {
                    Some(c) => Related::Found(c.clone()),
                    None => Related::Missing(transaction.category_id.clone()),
                };
                EnrichedTransaction {
                    transaction,
                    member,
                    category,
                }
            })
            .collect();

        let unresolved = enriched
            .iter()
            .filter(|e| e.member.is_missing() || e.category.is_missing())
            .count();
        if unresolved > 0 {
            debug!(unresolved, "Transactions with unresolved references");
        }

        Ok(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::{TimeZone, Utc};
    use ganadera_core::{Money, NewCategory, NewMember};
    use serde_json::json;

    struct Fixture {
        store: MemoryStore,
        repo: TransactionRepository,
        member: Member,
        category: LivestockCategory,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let shared: Arc<dyn TableStore> = Arc::new(store.clone());

        let member = MemberRepository::new(shared.clone())
            .insert(&NewMember {
                first_name: "Ana".to_string(),
                last_name: "Pérez".to_string(),
                national_id: "1".to_string(),
                phone: "1".to_string(),
                address: "1".to_string(),
                email: None,
                registered_at: Utc::now(),
                active: true,
            })
            .await
            .inserted()
            .unwrap();
        let category = CategoryRepository::new(shared.clone())
            .insert(&NewCategory {
                name: "Bovino".to_string(),
                description: None,
                active: true,
            })
            .await
            .inserted()
            .unwrap();

        Fixture {
            repo: TransactionRepository::new(shared),
            store,
            member,
            category,
        }
    }

    fn new_transaction(member_id: &str, category_id: &str, day: u32) -> NewTransaction {
        NewTransaction {
            member_id: member_id.to_string(),
            category_id: category_id.to_string(),
            quantity: 3,
            registered_at: Utc.with_ymd_and_hms(2024, 7, day, 12, 0, 0).unwrap(),
            notes: None,
            unit_price: Some(Money::from_cents(1050)),
            total: Some(Money::from_cents(3150)),
        }
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first() {
        let f = fixture().await;
        for day in [3, 10, 7] {
            f.repo
                .insert(&new_transaction(&f.member.id, &f.category.id, day))
                .await
                .inserted()
                .unwrap();
        }

        let days: Vec<u32> = f
            .repo
            .list_recent()
            .await
            .unwrap()
            .iter()
            .map(|t| chrono::Datelike::day(&t.registered_at))
            .collect();
        assert_eq!(days, vec![10, 7, 3]);
    }

    #[tokio::test]
    async fn test_insert_keeps_client_total() {
        let f = fixture().await;
        let tx = f
            .repo
            .insert(&new_transaction(&f.member.id, &f.category.id, 1))
            .await
            .inserted()
            .unwrap();

        assert_eq!(tx.total, Some(Money::from_cents(3150)));
        assert_eq!(tx.unit_price, Some(Money::from_cents(1050)));
    }

    #[tokio::test]
    async fn test_enrich_resolves_and_marks_missing() {
        let f = fixture().await;
        f.repo
            .insert(&new_transaction(&f.member.id, &f.category.id, 1))
            .await
            .inserted()
            .unwrap();
        f.repo
            .insert(&new_transaction("ghost", &f.category.id, 2))
            .await
            .inserted()
            .unwrap();

        let enriched = f.repo.list_recent_enriched().await.unwrap();
        assert_eq!(enriched.len(), 2);

        let ghost = &enriched[0];
        assert_eq!(ghost.member, Related::Missing("ghost".to_string()));
        assert_eq!(ghost.member_label(), "N/A");
        assert_eq!(ghost.category_label(), "Bovino");

        let known = &enriched[1];
        assert_eq!(known.member_label(), "Ana Pérez");
    }

    #[tokio::test]
    async fn test_enrich_finds_inactive_member() {
        let f = fixture().await;
        let retired = f.store.put(
            Table::Members,
            json!({
                "nombre": "Jubilado", "apellido": "Soto", "cedula": "77",
                "telefono": "0", "direccion": "-", "activo": false
            }),
        );
        let retired_id = retired["id"].as_str().unwrap();
        let tx = f
            .repo
            .insert(&new_transaction(retired_id, &f.category.id, 4))
            .await
            .inserted()
            .unwrap();

        let enriched = f.repo.enrich(vec![tx]).await.unwrap();
        assert_eq!(enriched[0].member_label(), "Jubilado Soto");
    }

    #[tokio::test]
    async fn test_enrich_with_known_rows_skips_lookups() {
        let f = fixture().await;
        let tx = f
            .repo
            .insert(&new_transaction(&f.member.id, &f.category.id, 5))
            .await
            .inserted()
            .unwrap();

        let calls = f.store.calls();
        let enriched = f
            .repo
            .enrich_with(vec![tx], &[f.member.clone()], &[f.category.clone()])
            .await
            .unwrap();

        assert_eq!(f.store.calls(), calls);
        assert_eq!(enriched[0].category_label(), "Bovino");
    }

    #[tokio::test]
    async fn test_list_for_member() {
        let f = fixture().await;
        f.repo
            .insert(&new_transaction(&f.member.id, &f.category.id, 1))
            .await
            .inserted()
            .unwrap();
        f.repo
            .insert(&new_transaction("other", &f.category.id, 2))
            .await
            .inserted()
            .unwrap();

        let rows = f.repo.list_for_member(&f.member.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_id, f.member.id);
    }
}
