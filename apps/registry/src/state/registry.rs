//! # Registry State
//!
//! The single point of contact with the hosted data service. Owns the three
//! working collections, the status of every operation and the error banner.
//!
//! ## Operation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Per-Operation Status                                 │
//! │                                                                         │
//! │   begin(op) ── banner cleared, status[op] = Loading                    │
//! │       │                                                                 │
//! │       ▼  (lock released, remote call awaited)                          │
//! │   ┌───────────────┐                                                     │
//! │   │  Ok(rows)     │──► collection replaced / row added, status = Idle  │
//! │   │  Err(e)       │──► collection untouched, status = Failed(msg),     │
//! │   │               │    banner = msg                                     │
//! │   └───────────────┘                                                     │
//! │                                                                         │
//! │  Loads:   members (active, by name)   categories (active, by name)     │
//! │           transactions (newest first, joined with member + category)  │
//! │  Creates: members/categories appended, transactions prepended          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mutex is only held to read or swap plain data, never across an
//! `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use ganadera_core::{
    grand_total, summarize_by_member, EnrichedTransaction, LivestockCategory, Member,
    MemberSummary, Money, NewCategory, NewMember, NewTransaction, Related, SummaryFilter,
    Transaction,
};
use ganadera_remote::{InsertOutcome, Remote, RemoteResult};

/// Every remote operation the registry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadMembers,
    LoadCategories,
    LoadTransactions,
    CreateMember,
    CreateCategory,
    CreateTransaction,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::LoadMembers,
        Operation::LoadCategories,
        Operation::LoadTransactions,
        Operation::CreateMember,
        Operation::CreateCategory,
        Operation::CreateTransaction,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug, Default)]
struct Inner {
    members: Vec<Member>,
    categories: Vec<LivestockCategory>,
    transactions: Vec<EnrichedTransaction>,
    status: HashMap<Operation, OperationStatus>,
    error: Option<String>,
}

/// Shared registry state. `Send + Sync`; wrap in an `Arc` to share.
#[derive(Debug)]
pub struct RegistryState {
    remote: Remote,
    inner: Mutex<Inner>,
}

impl RegistryState {
    pub fn new(remote: Remote) -> Self {
        RegistryState {
            remote,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn remote(&self) -> &Remote {
        &self.remote
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self, op: Operation) {
        let mut inner = self.lock();
        inner.error = None;
        inner.status.insert(op, OperationStatus::Loading);
    }

    fn succeed(&self, op: Operation) {
        self.lock().status.insert(op, OperationStatus::Idle);
    }

    fn fail(&self, op: Operation, message: String) {
        warn!(operation = ?op, "{}", message);
        let mut inner = self.lock();
        inner.status.insert(op, OperationStatus::Failed(message.clone()));
        inner.error = Some(message);
    }

    fn settle_outcome<T>(&self, op: Operation, outcome: &InsertOutcome<T>) {
        match outcome.error_message() {
            None => self.succeed(op),
            Some(message) => self.fail(op, message),
        }
    }

    // =========================================================================
    // Loads
    // =========================================================================

    /// Replaces the member list with the active members, by name.
    pub async fn load_members(&self) -> RemoteResult<usize> {
        self.begin(Operation::LoadMembers);
        match self.remote.members().list_active().await {
            Ok(members) => {
                let count = members.len();
                self.lock().members = members;
                self.succeed(Operation::LoadMembers);
                debug!(count, "Members loaded");
                Ok(count)
            }
            Err(e) => {
                self.fail(Operation::LoadMembers, e.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the category list with the active categories, by name.
    pub async fn load_categories(&self) -> RemoteResult<usize> {
        self.begin(Operation::LoadCategories);
        match self.remote.categories().list_active().await {
            Ok(categories) => {
                let count = categories.len();
                self.lock().categories = categories;
                self.succeed(Operation::LoadCategories);
                debug!(count, "Categories loaded");
                Ok(count)
            }
            Err(e) => {
                self.fail(Operation::LoadCategories, e.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the transaction list with every row, newest first, joined
    /// with its member and category.
    pub async fn load_transactions(&self) -> RemoteResult<usize> {
        self.begin(Operation::LoadTransactions);
        match self.fetch_transactions().await {
            Ok(transactions) => {
                let count = transactions.len();
                self.lock().transactions = transactions;
                self.succeed(Operation::LoadTransactions);
                debug!(count, "Transactions loaded");
                Ok(count)
            }
            Err(e) => {
                self.fail(Operation::LoadTransactions, e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch_transactions(&self) -> RemoteResult<Vec<EnrichedTransaction>> {
        let repo = self.remote.transactions();
        let rows = repo.list_recent().await?;
        let (members, categories) = (self.members(), self.categories());
        repo.enrich_with(rows, &members, &categories).await
    }

    /// Transactions of one member, newest first. Does not touch the loaded
    /// transaction list.
    pub async fn load_member_transactions(
        &self,
        member_id: &str,
    ) -> RemoteResult<Vec<EnrichedTransaction>> {
        self.begin(Operation::LoadTransactions);
        let repo = self.remote.transactions();
        let result = match repo.list_for_member(member_id).await {
            Ok(rows) => {
                let (members, categories) = (self.members(), self.categories());
                repo.enrich_with(rows, &members, &categories).await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(rows) => {
                self.succeed(Operation::LoadTransactions);
                Ok(rows)
            }
            Err(e) => {
                self.fail(Operation::LoadTransactions, e.to_string());
                Err(e)
            }
        }
    }

    /// Runs the three loads once, concurrently. Failures land in the banner.
    pub async fn initialize(&self) {
        info!("Loading registry data");
        let (members, categories, transactions) = tokio::join!(
            self.load_members(),
            self.load_categories(),
            self.load_transactions(),
        );
        info!(
            members = members.is_ok(),
            categories = categories.is_ok(),
            transactions = transactions.is_ok(),
            "Initial load finished"
        );
    }

    // =========================================================================
    // Creates
    // =========================================================================

    /// Inserts a member and appends the stored row.
    pub async fn create_member(&self, new: &NewMember) -> InsertOutcome<Member> {
        self.begin(Operation::CreateMember);
        let outcome = self.remote.members().insert(new).await;
        if let InsertOutcome::Inserted(member) = &outcome {
            info!(id = %member.id, cedula = %member.national_id, "Member created");
            self.lock().members.push(member.clone());
        }
        self.settle_outcome(Operation::CreateMember, &outcome);
        outcome
    }

    /// Inserts a category and appends the stored row.
    pub async fn create_category(&self, new: &NewCategory) -> InsertOutcome<LivestockCategory> {
        self.begin(Operation::CreateCategory);
        let outcome = self.remote.categories().insert(new).await;
        if let InsertOutcome::Inserted(category) = &outcome {
            info!(id = %category.id, nombre = %category.name, "Category created");
            self.lock().categories.push(category.clone());
        }
        self.settle_outcome(Operation::CreateCategory, &outcome);
        outcome
    }

    /// Inserts a transaction, joins it and puts it at the head of the list.
    pub async fn create_transaction(
        &self,
        new: &NewTransaction,
    ) -> InsertOutcome<EnrichedTransaction> {
        self.begin(Operation::CreateTransaction);
        let outcome = match self.remote.transactions().insert(new).await {
            InsertOutcome::Inserted(row) => InsertOutcome::Inserted(self.join_one(row).await),
            InsertOutcome::NoRowReturned => InsertOutcome::NoRowReturned,
            InsertOutcome::ServiceError(e) => InsertOutcome::ServiceError(e),
        };
        if let InsertOutcome::Inserted(row) = &outcome {
            info!(id = %row.transaction.id, total = ?row.transaction.total, "Transaction created");
            self.lock().transactions.insert(0, row.clone());
        }
        self.settle_outcome(Operation::CreateTransaction, &outcome);
        outcome
    }

    /// The insert already succeeded, so a failed lookup only degrades the
    /// labels.
    async fn join_one(&self, row: Transaction) -> EnrichedTransaction {
        let (members, categories) = (self.members(), self.categories());
        let fallback = EnrichedTransaction {
            member: Related::Missing(row.member_id.clone()),
            category: Related::Missing(row.category_id.clone()),
            transaction: row.clone(),
        };
        match self
            .remote
            .transactions()
            .enrich_with(vec![row], &members, &categories)
            .await
        {
            Ok(mut joined) if !joined.is_empty() => joined.remove(0),
            Ok(_) => fallback,
            Err(e) => {
                warn!(error = %e, "Could not resolve references of the new transaction");
                fallback
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn members(&self) -> Vec<Member> {
        self.lock().members.clone()
    }

    pub fn categories(&self) -> Vec<LivestockCategory> {
        self.lock().categories.clone()
    }

    pub fn transactions(&self) -> Vec<EnrichedTransaction> {
        self.lock().transactions.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn dismiss_error(&self) {
        self.lock().error = None;
    }

    pub fn status(&self, op: Operation) -> OperationStatus {
        self.lock().status.get(&op).cloned().unwrap_or_default()
    }

    pub fn is_busy(&self, op: Operation) -> bool {
        self.status(op) == OperationStatus::Loading
    }

    /// True while any operation is in flight.
    pub fn loading(&self) -> bool {
        self.lock()
            .status
            .values()
            .any(|s| *s == OperationStatus::Loading)
    }

    /// Per-member summaries over the loaded transactions.
    pub fn summaries(&self, filter: &SummaryFilter) -> Vec<MemberSummary> {
        let inner = self.lock();
        summarize_by_member(&inner.members, &inner.transactions, filter)
    }

    /// Sum of stored totals over the loaded transactions.
    pub fn grand_total(&self) -> Money {
        grand_total(&self.lock().transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use ganadera_core::{MemberForm, TransactionForm};
    use ganadera_remote::{MemoryStore, SelectQuery, Table, TableStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Holds every insert until `release` is notified.
    struct GatedStore {
        inner: MemoryStore,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl TableStore for GatedStore {
        async fn select(&self, table: Table, query: &SelectQuery) -> RemoteResult<Vec<Value>> {
            TableStore::select(&self.inner, table, query).await
        }

        async fn insert(&self, table: Table, row: Value) -> RemoteResult<Vec<Value>> {
            self.release.notified().await;
            TableStore::insert(&self.inner, table, row).await
        }
    }

    fn state() -> (MemoryStore, RegistryState) {
        let store = MemoryStore::new();
        let state = RegistryState::new(Remote::in_memory(store.clone()));
        (store, state)
    }

    fn new_member(cedula: &str) -> NewMember {
        MemberForm {
            first_name: "Ana".to_string(),
            last_name: "Pérez".to_string(),
            national_id: cedula.to_string(),
            phone: "8888-1234".to_string(),
            address: "Upala".to_string(),
            email: String::new(),
        }
        .to_new(Utc::now())
        .unwrap()
    }

    async fn seeded_ids(state: &RegistryState) -> (String, String) {
        let member = state.create_member(&new_member("1-1111")).await.inserted().unwrap();
        let category = state
            .create_category(&NewCategory {
                name: "Bovino".to_string(),
                description: None,
                active: true,
            })
            .await
            .inserted()
            .unwrap();
        (member.id, category.id)
    }

    fn transaction_form(member_id: &str, category_id: &str, price: &str) -> NewTransaction {
        TransactionForm {
            member_id: member_id.to_string(),
            category_id: category_id.to_string(),
            quantity: "3".to_string(),
            unit_price: price.to_string(),
            notes: String::new(),
        }
        .to_new(Utc::now())
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_member_appends_one_active_row() {
        let (_, state) = state();
        state.create_member(&new_member("1-1111")).await.inserted().unwrap();
        state.create_member(&new_member("2-2222")).await.inserted().unwrap();

        let members = state.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].national_id, "2-2222");
        assert!(members[1].active);
        assert!(members[1].registered_at.is_some());
        assert_eq!(state.status(Operation::CreateMember), OperationStatus::Idle);
    }

    #[tokio::test]
    async fn test_transaction_total_and_head_position() {
        let (_, state) = state();
        let (member_id, category_id) = seeded_ids(&state).await;

        let first = state
            .create_transaction(&transaction_form(&member_id, &category_id, "10.50"))
            .await
            .inserted()
            .unwrap();
        assert_eq!(first.transaction.total, Some(Money::from_cents(3150)));
        assert_eq!(first.member_label(), "Ana Pérez");

        let second = state
            .create_transaction(&transaction_form(&member_id, &category_id, ""))
            .await
            .inserted()
            .unwrap();
        assert_eq!(second.transaction.total, Some(Money::zero()));

        let list = state.transactions();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].transaction.id, second.transaction.id);
    }

    #[tokio::test]
    async fn test_in_flight_create_only_busies_itself() {
        let release = Arc::new(Notify::new());
        let store = GatedStore {
            inner: MemoryStore::new(),
            release: release.clone(),
        };
        let state = RegistryState::new(Remote::new(Arc::new(store)));
        let new = new_member("1-1111");

        let (outcome, ()) = tokio::join!(state.create_member(&new), async {
            while !state.is_busy(Operation::CreateMember) {
                tokio::task::yield_now().await;
            }
            assert!(state.loading());
            assert_eq!(state.status(Operation::CreateMember), OperationStatus::Loading);
            assert!(!state.is_busy(Operation::CreateCategory));
            assert!(!state.is_busy(Operation::LoadMembers));
            assert!(state.members().is_empty());
            release.notify_one();
        });

        assert!(outcome.inserted().is_some());
        assert_eq!(state.status(Operation::CreateMember), OperationStatus::Idle);
        assert!(!state.loading());
        assert_eq!(state.members().len(), 1);
    }

    #[tokio::test]
    async fn test_load_members_skips_inactive() {
        let (store, state) = state();
        store.put(
            Table::Members,
            json!({"nombre": "Zoila", "apellido": "Vargas", "cedula": "3", "telefono": "1",
                   "direccion": "-", "activo": true}),
        );
        store.put(
            Table::Members,
            json!({"nombre": "Beto", "apellido": "Rojas", "cedula": "4", "telefono": "1",
                   "direccion": "-", "activo": false}),
        );

        assert_eq!(state.load_members().await.unwrap(), 1);
        assert_eq!(state.members()[0].first_name, "Zoila");
    }

    #[tokio::test]
    async fn test_failed_create_sets_banner_until_next_operation() {
        let (store, state) = state();
        state.create_member(&new_member("1-1111")).await.inserted().unwrap();

        store.fail_next("duplicate key value violates unique constraint");
        let outcome = state.create_member(&new_member("1-1111")).await;
        assert!(matches!(outcome, InsertOutcome::ServiceError(_)));
        assert_eq!(state.members().len(), 1);
        assert_eq!(
            state.error().as_deref(),
            Some("duplicate key value violates unique constraint")
        );
        assert!(matches!(
            state.status(Operation::CreateMember),
            OperationStatus::Failed(_)
        ));

        store.fail_next("still down");
        state.load_categories().await.unwrap_err();
        assert_eq!(state.error().as_deref(), Some("still down"));

        state.load_categories().await.unwrap();
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_collection() {
        let (store, state) = state();
        state.create_member(&new_member("1-1111")).await.inserted().unwrap();

        store.fail_next("timeout");
        assert!(state.load_members().await.is_err());
        assert_eq!(state.members().len(), 1);
        assert_eq!(
            state.status(Operation::LoadMembers),
            OperationStatus::Failed("timeout".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_row_returned_is_not_a_service_error() {
        let (store, state) = state();
        store.return_no_row_next();

        let outcome = state.create_member(&new_member("1-1111")).await;
        assert!(matches!(outcome, InsertOutcome::NoRowReturned));
        assert!(state.members().is_empty());
        assert!(state.error().is_some());
    }

    #[tokio::test]
    async fn test_unknown_member_renders_na() {
        let (store, state) = state();
        let (_, category_id) = seeded_ids(&state).await;
        store.put(
            Table::Transactions,
            json!({"socio_id": "ghost", "tipo_ganado_id": category_id, "cantidad": 2,
                   "fecha_registro": "2024-07-01T10:00:00Z", "precio_unitario": 5, "total": 10}),
        );

        state.initialize().await;
        let rows = state.transactions();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_label(), "N/A");
        assert_eq!(rows[0].category_label(), "Bovino");
        assert!(!state.loading());
    }

    #[tokio::test]
    async fn test_dismiss_error() {
        let (store, state) = state();
        store.fail_next("boom");
        state.load_transactions().await.unwrap_err();
        assert_eq!(state.error().as_deref(), Some("boom"));

        state.dismiss_error();
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_member_transactions_and_summary() {
        let (_, state) = state();
        let (member_id, category_id) = seeded_ids(&state).await;
        let other = state.create_member(&new_member("9-9999")).await.inserted().unwrap();

        state
            .create_transaction(&transaction_form(&member_id, &category_id, "10.50"))
            .await;
        state
            .create_transaction(&transaction_form(&other.id, &category_id, "1"))
            .await;

        let own = state.load_member_transactions(&member_id).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(state.transactions().len(), 2);

        let filter = SummaryFilter {
            member_id: Some(member_id.clone()),
            date: None,
        };
        let summaries = state.summaries(&filter);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_quantity, 3);
        assert_eq!(summaries[0].total_income, Money::from_cents(3150));
        assert_eq!(state.grand_total(), Money::from_cents(3450));
    }
}
