//! # ganadera-core: Domain Logic for the Livestock Registry
//!
//! Entity types, money, validation and form rules for the cooperative's
//! registry. Nothing in this crate touches the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ganadera Registry Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              apps/registry (state container + CLI)              │   │
//! │  │    RegistryState, ConnectionProbe, Navigation, views           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ ganadera-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   form    │  │  summary  │  │   │
//! │  │   │  Member   │  │   Money   │  │  drafts   │  │  totals   │  │   │
//! │  │   │  Registro │  │  (cents)  │  │  submit   │  │ breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ganadera-remote (hosted table store)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Member, LivestockCategory, Transaction and their insert payloads
//! - [`money`] - Integer-cent money with a decimal wire format
//! - [`form`] - Form drafts and submit rules
//! - [`summary`] - Per-member totals
//! - [`validation`] - Field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use ganadera_core::form::TransactionForm;
//!
//! let mut form = TransactionForm {
//!     member_id: "m-1".into(),
//!     category_id: "c-1".into(),
//!     quantity: "3".into(),
//!     unit_price: "10.50".into(),
//!     notes: String::new(),
//! };
//!
//! let new = form.submit(false, Utc::now()).unwrap();
//! assert_eq!(new.total.unwrap().cents(), 3150);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod money;
pub mod summary;
pub mod timestamp;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{CategoryForm, MemberForm, TransactionForm};
pub use money::Money;
pub use summary::{
    grand_total, has_unknown_category, summarize_by_member, CategoryQuantity, MemberSummary,
    SummaryFilter,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for a transaction quantity.
pub const MAX_QUANTITY: i64 = 999_999;

/// Upper bound for a unit price: 100 000 000.00.
///
/// With [`MAX_QUANTITY`] the largest total is about 10^16 cents, well inside
/// i64.
pub const MAX_UNIT_PRICE: money::Money = money::Money::from_cents(10_000_000_000);

/// Maximum length of free-text notes and descriptions.
pub const MAX_NOTES_LENGTH: usize = 1_000;
