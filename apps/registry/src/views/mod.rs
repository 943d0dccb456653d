//! # Views
//!
//! Plain-text rendering of the four registry views, the connection line
//! and the error banner.
//!
//! ```text
//! ● Connected to data service
//!
//! Members
//! Name        Cédula       Phone       Email               Registered
//! ──────────  ───────────  ──────────  ──────────────────  ───────────
//! Ana Pérez   1-1234-0567  8888-1234   ana.perez@correo.cr 05 Jul 2024
//! Luis Mora   2-0444-0555  8765-4321   -                   -
//! ```

pub mod categories;
pub mod members;
pub mod summary;
pub mod transactions;

use ganadera_core::TransactionForm;

use crate::commands::{category, member, transaction};
use crate::state::{ConnectionStatus, DisplayConfig, RegistryState, View};

/// Left-aligned text table sized to its widest cells.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TextTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().take(columns).enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();

        let mut out = Vec::with_capacity(self.rows.len() + 2);
        out.push(line(&self.headers));
        out.push(rule.join("  "));
        for row in &self.rows {
            out.push(line(row));
        }
        out.join("\n")
    }
}

/// A titled section: the table, or `empty` when there are no rows.
pub fn section(title: &str, table: &TextTable, empty: &str) -> String {
    if table.is_empty() {
        format!("{}\n\n{}", title, empty)
    } else {
        format!("{}\n\n{}", title, table.render())
    }
}

/// Renders `view` from the loaded collections.
pub fn render_view(view: View, state: &RegistryState, display: &DisplayConfig) -> String {
    match view {
        View::Members => members::render(&member::list_members(state), display),
        View::Categories => categories::render(&category::list_categories(state)),
        View::Transactions => {
            transactions::render(&transaction::list_transactions(state), display)
        }
        View::NewTransaction => transactions::render_form(
            &TransactionForm::default(),
            &member::list_members(state),
            &category::list_categories(state),
            display,
        ),
    }
}

/// The error banner line, if there is an error to show.
pub fn banner(error: Option<&str>) -> Option<String> {
    error.map(|message| format!("✗ {}", message))
}

pub fn connection_line(status: &ConnectionStatus) -> String {
    match status {
        ConnectionStatus::Checking => "○ Checking connection...".to_string(),
        ConnectionStatus::Connected => "● Connected to data service".to_string(),
        ConnectionStatus::Error(message) => {
            format!("✗ Error: {} (retry with `ganadera status`)", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pads_to_widest_cell() {
        let mut table = TextTable::new(["Name", "Qty"]);
        table.add_row(vec!["Bovino".to_string(), "3".to_string()]);
        table.add_row(vec!["Ovino".to_string(), "12".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Name    Qty");
        assert_eq!(lines[1], "──────  ───");
        assert_eq!(lines[2], "Bovino  3");
        assert_eq!(lines[3], "Ovino   12");
    }

    #[test]
    fn test_empty_section_shows_message() {
        let table = TextTable::new(["Name"]);
        assert_eq!(section("Members", &table, "No members registered"), "Members\n\nNo members registered");
    }

    #[test]
    fn test_render_empty_views() {
        use ganadera_remote::{MemoryStore, Remote};

        let state = RegistryState::new(Remote::in_memory(MemoryStore::new()));
        let display = DisplayConfig::default();
        assert!(render_view(View::Members, &state, &display).ends_with(members::EMPTY_MESSAGE));
        assert!(render_view(View::Transactions, &state, &display)
            .ends_with(transactions::EMPTY_MESSAGE));
        assert!(render_view(View::NewTransaction, &state, &display).contains("Select a member"));
    }

    #[test]
    fn test_banner_and_connection_line() {
        assert_eq!(banner(None), None);
        assert_eq!(banner(Some("timeout")).as_deref(), Some("✗ timeout"));
        assert!(connection_line(&ConnectionStatus::Error("bad key".to_string())).contains("bad key"));
    }
}
