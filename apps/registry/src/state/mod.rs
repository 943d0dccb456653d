//! # State Module
//!
//! Application state for the registry.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌───────────────┐  ┌─────────────────┐  ┌───────────────┐  ┌────────┐ │
//! │  │ RegistryState │  │ ConnectionProbe │  │NavigationState│  │Display │ │
//! │  │               │  │                 │  │               │  │Config  │ │
//! │  │ members       │  │ Checking        │  │ active view   │  │ $, dd  │ │
//! │  │ categories    │  │ Connected       │  │ category modal│  │ Mon    │ │
//! │  │ transactions  │  │ Error(msg)      │  │               │  │ yyyy   │ │
//! │  │ status/banner │  │                 │  │ Arc<Mutex<>>  │  │        │ │
//! │  └───────┬───────┘  └────────┬────────┘  └───────────────┘  └────────┘ │
//! │          │                   │                                          │
//! │          └──────── Remote ───┘                                          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • RegistryState / ConnectionProbe: std Mutex, never held across await │
//! │  • NavigationState: Arc<Mutex<Navigation>>                             │
//! │  • DisplayConfig: read-only after startup                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod navigation;
mod probe;
mod registry;

pub use config::{DisplayConfig, EMPTY_CELL};
pub use navigation::{Navigation, NavigationState, View};
pub use probe::{ConnectionProbe, ConnectionStatus};
pub use registry::{Operation, OperationStatus, RegistryState};
