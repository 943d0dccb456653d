//! # ganadera-remote: Hosted Data Service Layer
//!
//! Access to the cooperative's tables on a Supabase project, through the
//! PostgREST HTTP interface.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ganadera Registry Data Flow                         │
//! │                                                                         │
//! │  RegistryState (load_members, create_transaction, ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                ganadera-remote (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Remote     │    │  Repositories │    │  TableStore  │  │   │
//! │  │   │  (remote.rs)  │───►│ MemberRepo    │───►│  RestClient  │  │   │
//! │  │   │               │    │ CategoryRepo  │    │  MemoryStore │  │   │
//! │  │   │ ping()        │    │ TransactionRepo│   │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼ HTTPS                                                           │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   {SUPABASE_URL}/rest/v1/{socios | tipos_ganado | registros}    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Endpoint settings (file + environment)
//! - [`query`] - PostgREST select model
//! - [`store`] - The `TableStore` trait and `InsertOutcome`
//! - [`client`] - HTTP implementation
//! - [`memory`] - In-process implementation
//! - [`repository`] - Typed repositories and the transaction join
//! - [`sample`] - Sample data set
//! - [`error`] - Remote error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ganadera_remote::{Remote, RemoteConfig};
//!
//! let remote = Remote::from_config(&RemoteConfig::load()?)?;
//! remote.ping().await?;
//!
//! let members = remote.members().list_active().await?;
//! let registros = remote.transactions().list_recent_enriched().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod query;
pub mod remote;
pub mod repository;
pub mod sample;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::RestClient;
pub use config::{Endpoint, RemoteConfig};
pub use error::{ConfigError, RemoteError, RemoteResult};
pub use memory::MemoryStore;
pub use query::{Direction, SelectQuery, Table};
pub use remote::Remote;
pub use store::{InsertOutcome, TableStore};

// Repository re-exports for convenience
pub use repository::{CategoryRepository, MemberRepository, TransactionRepository};
