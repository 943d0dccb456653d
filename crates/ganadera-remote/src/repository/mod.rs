//! # Repository Module
//!
//! Typed access to the three remote tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RegistryState                                                         │
//! │       │                                                                 │
//! │       │  remote.members().list_active()                                │
//! │       ▼                                                                 │
//! │  MemberRepository                                                      │
//! │  ├── list_active()          activo=eq.true, order=nombre.asc           │
//! │  ├── find_by_ids(ids)       id=in.(...)                                │
//! │  └── insert(new)            Prefer: return=representation              │
//! │       │                                                                 │
//! │       │  SelectQuery / JSON row                                         │
//! │       ▼                                                                 │
//! │  dyn TableStore  (RestClient | MemoryStore)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`MemberRepository`] - socios
//! - [`CategoryRepository`] - tipos_ganado
//! - [`TransactionRepository`] - registros, plus the member/category join

pub mod category;
pub mod member;
pub mod transaction;

pub use category::CategoryRepository;
pub use member::MemberRepository;
pub use transaction::TransactionRepository;

/// Column holding the soft-delete flag.
pub(crate) const ACTIVE_COLUMN: &str = "activo";

/// Column holding display names, used for ordering.
pub(crate) const NAME_COLUMN: &str = "nombre";

/// Column holding the registration timestamp.
pub(crate) const REGISTERED_AT_COLUMN: &str = "fecha_registro";

/// Deduplicated, sorted ids for an `in` filter.
pub(crate) fn unique_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let set: std::collections::BTreeSet<&String> = ids.into_iter().collect();
    set.into_iter().cloned().collect()
}
