//! # Commands Module
//!
//! Everything the CLI (or any other front-end) can ask the registry to do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── member.rs       ◄─── list, create, resolve by cédula
//! ├── category.rs     ◄─── list, create (category dialog)
//! ├── transaction.rs  ◄─── list, per-member list, preview, create
//! ├── summary.rs      ◄─── per-member totals
//! └── status.rs       ◄─── connection probe, operation status, banner
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fn create_member(                                                      │
//! │      state: &RegistryState,     ◄── shared container                    │
//! │      form: &mut MemberForm,     ◄── draft, cleared on submit            │
//! │  ) -> Result<MemberDto, ApiError>                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  DTO (camelCase, JSON-ready) or ApiError { code, message }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod category;
pub mod member;
pub mod status;
pub mod summary;
pub mod transaction;

pub use category::CategoryDto;
pub use member::MemberDto;
pub use status::StatusDto;
pub use summary::SummaryDto;
pub use transaction::TransactionDto;
