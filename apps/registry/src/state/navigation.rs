//! # Navigation
//!
//! Which view is showing, and whether the category dialog is open.
//!
//! ```text
//!   socios ◄──► tipos ◄──► registros ◄──► nuevo-registro
//!                 │                            │
//!                 └──── category modal ◄───────┘
//!
//!   transaction created ──► registros
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Members,
    Categories,
    Transactions,
    NewTransaction,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Members,
        View::Categories,
        View::Transactions,
        View::NewTransaction,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            View::Members => "socios",
            View::Categories => "tipos",
            View::Transactions => "registros",
            View::NewTransaction => "nuevo-registro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Members => "Members",
            View::Categories => "Livestock categories",
            View::Transactions => "Transactions",
            View::NewTransaction => "New transaction",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for View {
    type Err = String;

    /// Accepts the slug or the English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "socios" | "members" => Ok(View::Members),
            "tipos" | "categories" => Ok(View::Categories),
            "registros" | "transactions" => Ok(View::Transactions),
            "nuevo-registro" | "new-transaction" => Ok(View::NewTransaction),
            other => Err(format!(
                "unknown view '{}' (expected one of: socios, tipos, registros, nuevo-registro)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    active: View,
    category_modal_open: bool,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn category_modal_open(&self) -> bool {
        self.category_modal_open
    }

    /// Switches view. Closes the dialog.
    pub fn show(&mut self, view: View) {
        self.active = view;
        self.category_modal_open = false;
    }

    /// Opens the category dialog. Only the categories view and the
    /// new-transaction form offer it; returns whether it opened.
    pub fn open_category_modal(&mut self) -> bool {
        if matches!(self.active, View::Categories | View::NewTransaction) {
            self.category_modal_open = true;
        }
        self.category_modal_open
    }

    pub fn close_category_modal(&mut self) {
        self.category_modal_open = false;
    }

    pub fn on_transaction_created(&mut self) {
        self.show(View::Transactions);
    }
}

/// Shared navigation, for commands that run next to each other.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    nav: Arc<Mutex<Navigation>>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the navigation.
    pub fn with_nav<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Navigation) -> R,
    {
        let nav = self.nav.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&nav)
    }

    /// Executes a function with write access to the navigation.
    pub fn with_nav_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Navigation) -> R,
    {
        let mut nav = self.nav.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut nav)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for view in View::ALL {
            assert_eq!(view.slug().parse::<View>(), Ok(view));
        }
        assert!("corrales".parse::<View>().is_err());
    }

    #[test]
    fn test_category_modal_only_from_allowed_views() {
        let mut nav = Navigation::new();
        assert!(!nav.open_category_modal());

        nav.show(View::NewTransaction);
        assert!(nav.open_category_modal());

        nav.close_category_modal();
        nav.show(View::Categories);
        assert!(nav.open_category_modal());

        nav.show(View::Members);
        assert!(!nav.category_modal_open());
    }

    #[test]
    fn test_created_transaction_switches_to_list() {
        let mut nav = Navigation::new();
        nav.show(View::NewTransaction);
        nav.on_transaction_created();
        assert_eq!(nav.active(), View::Transactions);
    }

    #[test]
    fn test_shared_state() {
        let state = NavigationState::new();
        let other = state.clone();
        other.with_nav_mut(|nav| nav.show(View::Categories));
        assert_eq!(state.with_nav(Navigation::active), View::Categories);
    }
}
