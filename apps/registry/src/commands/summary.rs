//! # Summary Commands
//!
//! Per-member totals over the loaded transactions, plus the grand total.

use chrono::NaiveDate;
use serde::Serialize;

use crate::state::RegistryState;
use ganadera_core::{MemberSummary, Money, SummaryFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub members: Vec<MemberSummary>,
    /// Across every loaded transaction, not only the filtered ones.
    pub grand_total: Money,
}

pub fn get_summary(
    state: &RegistryState,
    member_id: Option<String>,
    date: Option<NaiveDate>,
) -> SummaryDto {
    let filter = SummaryFilter { member_id, date };
    SummaryDto {
        members: state.summaries(&filter),
        grand_total: state.grand_total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ganadera_remote::{MemoryStore, Remote, Table};
    use serde_json::json;

    #[tokio::test]
    async fn test_summary_by_date() {
        let store = MemoryStore::new();
        let member = store.put(
            Table::Members,
            json!({"nombre": "Jorge", "apellido": "Solís", "cedula": "7", "telefono": "1",
                   "direccion": "Guápiles", "activo": true}),
        );
        let category = store.put(Table::Categories, json!({"nombre": "Porcino", "activo": true}));
        for (day, total) in [(1, 10.0), (2, 25.5)] {
            let at = Utc.with_ymd_and_hms(2024, 7, day, 8, 0, 0).unwrap();
            store.put(
                Table::Transactions,
                json!({"socio_id": member["id"], "tipo_ganado_id": category["id"],
                       "cantidad": 1, "fecha_registro": at.to_rfc3339(),
                       "precio_unitario": total, "total": total}),
            );
        }

        let state = RegistryState::new(Remote::in_memory(store));
        state.initialize().await;

        let all = get_summary(&state, None, None);
        assert_eq!(all.members.len(), 1);
        assert_eq!(all.members[0].total_income, Money::from_cents(3550));

        let day_two = get_summary(&state, None, NaiveDate::from_ymd_opt(2024, 7, 2));
        assert_eq!(day_two.members[0].transaction_count, 1);
        assert_eq!(day_two.members[0].total_income, Money::from_cents(2550));
        assert_eq!(day_two.grand_total, Money::from_cents(3550));
    }
}
