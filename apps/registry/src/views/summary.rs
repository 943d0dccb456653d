use ganadera_core::has_unknown_category;

use crate::commands::SummaryDto;
use crate::state::DisplayConfig;
use crate::views::{section, TextTable};

pub const EMPTY_MESSAGE: &str = "No members to summarize";

pub fn render(summary: &SummaryDto, display: &DisplayConfig) -> String {
    let mut table = TextTable::new(["Member", "Transactions", "Quantity", "Income", "By category"]);
    let mut unresolved = false;
    for s in &summary.members {
        let flagged = has_unknown_category(s);
        unresolved |= flagged;
        let breakdown: Vec<String> = s
            .by_category
            .iter()
            .map(|c| format!("{} {}", c.category, c.quantity))
            .collect();
        table.add_row(vec![
            if flagged {
                format!("{} *", s.member_name)
            } else {
                s.member_name.clone()
            },
            s.transaction_count.to_string(),
            s.total_quantity.to_string(),
            display.format_money(s.total_income),
            if breakdown.is_empty() {
                "-".to_string()
            } else {
                breakdown.join(", ")
            },
        ]);
    }

    let mut out = section("Summary by member", &table, EMPTY_MESSAGE);
    if unresolved {
        out.push_str("\n* includes transactions whose category could not be resolved");
    }
    out.push_str(&format!(
        "\n\nGrand total: {}",
        display.format_money(summary.grand_total)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganadera_core::{CategoryQuantity, MemberSummary, Money};

    #[test]
    fn test_render_breakdown_and_grand_total() {
        let summary = SummaryDto {
            members: vec![MemberSummary {
                member_id: "m-1".to_string(),
                member_name: "Ana Pérez".to_string(),
                transaction_count: 2,
                total_quantity: 13,
                total_income: Money::from_cents(2_200_000),
                by_category: vec![
                    CategoryQuantity {
                        category_id: "c-1".to_string(),
                        category: "Bovino".to_string(),
                        resolved: true,
                        quantity: 3,
                    },
                    CategoryQuantity {
                        category_id: "c-gone".to_string(),
                        category: "N/A".to_string(),
                        resolved: false,
                        quantity: 10,
                    },
                ],
            }],
            grand_total: Money::from_cents(2_200_000),
        };

        let out = render(&summary, &DisplayConfig::default());
        assert!(out.contains("Bovino 3, N/A 10"));
        assert!(out.contains("Ana Pérez *"));
        assert!(out.contains("$22000.00"));
        assert!(out.ends_with("Grand total: $22000.00"));
    }
}
