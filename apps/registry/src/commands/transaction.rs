//! # Transaction Commands
//!
//! The transactions list, the per-member listing and the new-transaction
//! form.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TransactionForm { socio, tipo, cantidad: "3", precio: "10.50" }        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  preview_total() ──► "$31.50" shown under the form                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  submit(busy, now) ──► NewTransaction { total: 31.50, .. }             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RegistryState::create_transaction ──► row joined, prepended           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Navigation ──► registros                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{NavigationState, Operation, RegistryState};
use ganadera_core::{EnrichedTransaction, Money, TransactionForm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub registered_at: DateTime<Utc>,
    pub member_id: String,
    /// Member's full name, or `N/A` when the reference did not resolve.
    pub member_name: String,
    pub category_id: String,
    pub category_name: String,
    pub quantity: i64,
    pub unit_price: Option<Money>,
    pub total: Option<Money>,
    pub notes: Option<String>,
}

impl From<EnrichedTransaction> for TransactionDto {
    fn from(row: EnrichedTransaction) -> Self {
        let member_name = row.member_label();
        let category_name = row.category_label();
        let t = row.transaction;
        TransactionDto {
            id: t.id,
            registered_at: t.registered_at,
            member_id: t.member_id,
            member_name,
            category_id: t.category_id,
            category_name,
            quantity: t.quantity,
            unit_price: t.unit_price,
            total: t.total,
            notes: t.notes,
        }
    }
}

pub fn list_transactions(state: &RegistryState) -> Vec<TransactionDto> {
    state
        .transactions()
        .into_iter()
        .map(TransactionDto::from)
        .collect()
}

/// Transactions of one member, newest first.
pub async fn list_member_transactions(
    state: &RegistryState,
    member_id: &str,
) -> Result<Vec<TransactionDto>, ApiError> {
    let rows = state.load_member_transactions(member_id).await?;
    Ok(rows.into_iter().map(TransactionDto::from).collect())
}

/// Live total for the form, if both quantity and price have input.
pub fn preview_total(form: &TransactionForm) -> Option<Money> {
    form.preview_total()
}

/// Submits the new-transaction form and switches to the transactions view.
pub async fn create_transaction(
    state: &RegistryState,
    nav: &NavigationState,
    form: &mut TransactionForm,
) -> Result<TransactionDto, ApiError> {
    let busy = state.is_busy(Operation::CreateTransaction);
    let new = form.submit(busy, Utc::now())?;
    debug!(
        socio_id = %new.member_id,
        tipo_ganado_id = %new.category_id,
        cantidad = new.quantity,
        "Submitting transaction"
    );

    let row = ApiError::from_outcome(state.create_transaction(&new).await)?;
    nav.with_nav_mut(|n| n.on_transaction_created());
    Ok(row.into())
}
