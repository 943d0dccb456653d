//! Transactions list and the new-transaction form.

use ganadera_core::TransactionForm;

use crate::commands::{CategoryDto, MemberDto, TransactionDto};
use crate::state::{DisplayConfig, EMPTY_CELL};
use crate::views::{section, TextTable};

pub const EMPTY_MESSAGE: &str = "No livestock transactions";

pub fn render(rows: &[TransactionDto], display: &DisplayConfig) -> String {
    let mut table = TextTable::new([
        "Date", "Member", "Category", "Qty", "Unit price", "Total", "Notes",
    ]);
    for r in rows {
        table.add_row(vec![
            display.format_date(&r.registered_at),
            r.member_name.clone(),
            r.category_name.clone(),
            r.quantity.to_string(),
            display.format_optional_money(r.unit_price),
            display.format_optional_money(r.total),
            r.notes.clone().unwrap_or_else(|| EMPTY_CELL.to_string()),
        ]);
    }
    section("Transactions", &table, EMPTY_MESSAGE)
}

/// The form with its pickers, as filled so far.
pub fn render_form(
    form: &TransactionForm,
    members: &[MemberDto],
    categories: &[CategoryDto],
    display: &DisplayConfig,
) -> String {
    let picked_member = members
        .iter()
        .find(|m| m.id == form.member_id)
        .map_or("Select a member", |m| m.picker_label.as_str());
    let picked_category = categories
        .iter()
        .find(|c| c.id == form.category_id)
        .map_or("Select a category", |c| c.name.as_str());

    let mut lines = vec![
        "New transaction".to_string(),
        String::new(),
        format!("Member:     {}", picked_member),
        format!("Category:   {}", picked_category),
        format!("Quantity:   {}", form.quantity),
        format!("Unit price: {}", form.unit_price),
        format!("Notes:      {}", form.notes),
    ];
    if let Some(total) = form.preview_total() {
        lines.push(format!("Total: {}", display.format_money(total)));
    }

    lines.push(String::new());
    lines.push(format!("Members ({}):", members.len()));
    lines.extend(members.iter().map(|m| format!("  {}", m.picker_label)));
    lines.push(format!("Categories ({}):", categories.len()));
    lines.extend(categories.iter().map(|c| format!("  {}", c.name)));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ganadera_core::Money;

    fn row(member_name: &str) -> TransactionDto {
        TransactionDto {
            id: "t-1".to_string(),
            registered_at: Utc.with_ymd_and_hms(2024, 7, 5, 12, 0, 0).unwrap(),
            member_id: "ghost".to_string(),
            member_name: member_name.to_string(),
            category_id: "c-1".to_string(),
            category_name: "Bovino".to_string(),
            quantity: 3,
            unit_price: Some(Money::from_cents(1050)),
            total: Some(Money::from_cents(3150)),
            notes: None,
        }
    }

    #[test]
    fn test_row_rendering() {
        let out = render(&[row("N/A")], &DisplayConfig::default());
        let last = out.lines().last().unwrap();
        assert_eq!(last, "05 Jul 2024  N/A     Bovino    3    $10.50      $31.50  -");
    }

    #[test]
    fn test_form_preview_only_with_both_fields() {
        let display = DisplayConfig::default();
        let mut form = TransactionForm {
            quantity: "3".to_string(),
            ..TransactionForm::default()
        };
        assert!(!render_form(&form, &[], &[], &display).contains("Total:"));

        form.unit_price = "10.50".to_string();
        let out = render_form(&form, &[], &[], &display);
        assert!(out.contains("Total: $31.50"));
        assert!(out.contains("Category:   Select a category"));
    }
}
