//! # Remote Handle
//!
//! Entry point to the hosted data service: owns the store and hands out
//! repositories.
//!
//! ```text
//! RemoteConfig::load()? ──► validate() ──► Endpoint
//!                                              │
//!                                   Remote::connect(endpoint)
//!                                              │
//!              ┌───────────────────────────────┼──────────────────────┐
//!              ▼                               ▼                      ▼
//!       remote.members()             remote.categories()    remote.transactions()
//! ```

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{Endpoint, RemoteConfig};
use crate::client::RestClient;
use crate::error::RemoteResult;
use crate::memory::MemoryStore;
use crate::query::{SelectQuery, Table};
use crate::repository::{CategoryRepository, MemberRepository, TransactionRepository};
use crate::store::TableStore;

/// Cheap to clone; every clone shares the same store.
#[derive(Clone)]
pub struct Remote {
    store: Arc<dyn TableStore>,
}

impl std::fmt::Debug for Remote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remote").finish_non_exhaustive()
    }
}

impl Remote {
    /// Wraps any store.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Remote { store }
    }

    /// Builds the HTTP client for `endpoint`. Does not touch the network.
    pub fn connect(endpoint: Endpoint) -> RemoteResult<Self> {
        info!(base_url = %endpoint.base_url, "Configuring remote data service");
        let client = RestClient::new(endpoint)?;
        Ok(Remote::new(Arc::new(client)))
    }

    /// Loads, validates and connects in one step.
    pub fn from_config(config: &RemoteConfig) -> RemoteResult<Self> {
        let endpoint = config.validate()?;
        Self::connect(endpoint)
    }

    /// A remote backed by `store`, kept in process.
    pub fn in_memory(store: MemoryStore) -> Self {
        debug!("Using in-memory store");
        Remote::new(Arc::new(store))
    }

    pub fn members(&self) -> MemberRepository {
        MemberRepository::new(self.store.clone())
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.store.clone())
    }

    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.store.clone())
    }

    /// Minimal read used as a connectivity check: `select=id&limit=1` on
    /// `socios`.
    pub async fn ping(&self) -> RemoteResult<()> {
        let query = SelectQuery::all().columns("id").limit(1);
        self.store.select(Table::Members, &query).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, RemoteError};

    #[tokio::test]
    async fn test_ping_against_memory() {
        let store = MemoryStore::new();
        let remote = Remote::in_memory(store.clone());

        assert!(remote.ping().await.is_ok());

        store.fail_next("relation \"socios\" does not exist");
        let err = remote.ping().await.unwrap_err();
        assert_eq!(err.to_string(), "relation \"socios\" does not exist");
    }

    #[test]
    fn test_from_config_requires_settings() {
        let err = Remote::from_config(&RemoteConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RemoteError::Config(ConfigError::Missing(crate::config::ENV_URL))
        ));
    }
}
