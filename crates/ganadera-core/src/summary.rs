//! # Member Summaries
//!
//! Aggregates over the loaded transactions: per member totals with a
//! per-category breakdown, and the grand total across every row.
//!
//! ```text
//! Member "Ana Pérez"
//!   quantity  12          ◄── Σ cantidad
//!   income    $420.00     ◄── Σ total (stored totals, never recomputed)
//!   Bovino     8
//!   Porcino    4
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{EnrichedTransaction, Member};

/// Quantity of one category within a member summary.
///
/// Entries are keyed on `category_id`; `category` is only the label, so two
/// categories sharing a name stay apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryQuantity {
    pub category_id: String,
    pub category: String,
    /// False when the category row could not be found.
    pub resolved: bool,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MemberSummary {
    pub member_id: String,
    pub member_name: String,
    pub transaction_count: usize,
    pub total_quantity: i64,
    pub total_income: Money,
    /// In first-seen order.
    pub by_category: Vec<CategoryQuantity>,
}

/// Narrows which members and rows are summarized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub member_id: Option<String>,
    /// Only rows registered on this calendar day (UTC).
    pub date: Option<NaiveDate>,
}

impl SummaryFilter {
    fn accepts_member(&self, member: &Member) -> bool {
        self.member_id.as_deref().map_or(true, |id| id == member.id)
    }

    fn accepts_row(&self, row: &EnrichedTransaction) -> bool {
        self.date
            .map_or(true, |date| row.transaction.registered_at.date_naive() == date)
    }
}

/// Builds one summary per member, in the order of `members`.
///
/// Members without matching rows still get a zeroed summary. Rows whose
/// category could not be resolved keep their own entry per id, labelled `N/A`.
pub fn summarize_by_member(
    members: &[Member],
    transactions: &[EnrichedTransaction],
    filter: &SummaryFilter,
) -> Vec<MemberSummary> {
    members
        .iter()
        .filter(|member| filter.accepts_member(member))
        .map(|member| {
            let rows: Vec<&EnrichedTransaction> = transactions
                .iter()
                .filter(|row| row.transaction.member_id == member.id)
                .filter(|row| filter.accepts_row(row))
                .collect();

            let mut by_category: Vec<CategoryQuantity> = Vec::new();
            for row in &rows {
                let category_id = &row.transaction.category_id;
                match by_category.iter_mut().find(|c| &c.category_id == category_id) {
                    Some(entry) => entry.quantity += row.transaction.quantity,
                    None => by_category.push(CategoryQuantity {
                        category_id: category_id.clone(),
                        category: row.category_label(),
                        resolved: !row.category.is_missing(),
                        quantity: row.transaction.quantity,
                    }),
                }
            }

            MemberSummary {
                member_id: member.id.clone(),
                member_name: member.full_name(),
                transaction_count: rows.len(),
                total_quantity: rows.iter().map(|r| r.transaction.quantity).sum(),
                total_income: rows.iter().filter_map(|r| r.transaction.total).sum(),
                by_category,
            }
        })
        .collect()
}

/// Sum of stored totals. Rows without a total count as zero.
pub fn grand_total(transactions: &[EnrichedTransaction]) -> Money {
    transactions
        .iter()
        .filter_map(|row| row.transaction.total)
        .sum()
}

/// True if any summarized row had an unresolved category.
pub fn has_unknown_category(summary: &MemberSummary) -> bool {
    summary.by_category.iter().any(|c| !c.resolved)
}
