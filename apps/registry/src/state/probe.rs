//! # Connection Probe
//!
//! Checks whether the hosted service answers, with a manual retry.
//!
//! ```text
//! new() ──► Checking ──► check() ──┬── ping ok ──► Connected
//!                                  └── error   ──► Error(message)
//!                                                      │
//!                                        retry() ◄─────┘  (user action)
//! ```
//!
//! No backoff and no automatic retry.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{info, warn};

use ganadera_remote::{ConfigError, Remote};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum ConnectionStatus {
    Checking,
    Connected,
    Error(String),
}

#[derive(Debug)]
pub struct ConnectionProbe {
    remote: Option<Remote>,
    config_error: Option<ConfigError>,
    status: Mutex<ConnectionStatus>,
}

impl ConnectionProbe {
    pub fn new(remote: Remote) -> Self {
        ConnectionProbe {
            remote: Some(remote),
            config_error: None,
            status: Mutex::new(ConnectionStatus::Checking),
        }
    }

    /// A probe for a registry that could not be configured. Every check
    /// reports the configuration message.
    pub fn unconfigured(error: ConfigError) -> Self {
        let status = ConnectionStatus::Error(error.to_string());
        ConnectionProbe {
            remote: None,
            config_error: Some(error),
            status: Mutex::new(status),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConnectionStatus> {
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn status(&self) -> ConnectionStatus {
        self.lock().clone()
    }

    /// Issues the minimal read and records the result.
    pub async fn check(&self) -> ConnectionStatus {
        *self.lock() = ConnectionStatus::Checking;

        let status = match (&self.remote, &self.config_error) {
            (Some(remote), _) => match remote.ping().await {
                Ok(()) => {
                    info!("Connected to data service");
                    ConnectionStatus::Connected
                }
                Err(e) => {
                    warn!(error = %e, "Data service unreachable");
                    ConnectionStatus::Error(e.to_string())
                }
            },
            (None, Some(e)) => ConnectionStatus::Error(e.to_string()),
            (None, None) => ConnectionStatus::Error("No data service configured".to_string()),
        };

        *self.lock() = status.clone();
        status
    }

    /// Same probe again.
    pub async fn retry(&self) -> ConnectionStatus {
        self.check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganadera_remote::MemoryStore;

    #[tokio::test]
    async fn test_check_and_retry() {
        let store = MemoryStore::new();
        let probe = ConnectionProbe::new(Remote::in_memory(store.clone()));
        assert_eq!(probe.status(), ConnectionStatus::Checking);

        store.fail_next("relation \"socios\" does not exist");
        assert_eq!(
            probe.check().await,
            ConnectionStatus::Error("relation \"socios\" does not exist".to_string())
        );

        assert_eq!(probe.retry().await, ConnectionStatus::Connected);
        assert_eq!(probe.status(), ConnectionStatus::Connected);
    }

    #[tokio::test]
    async fn test_unconfigured_reports_config_message() {
        let probe = ConnectionProbe::unconfigured(ConfigError::Missing("SUPABASE_URL"));
        match probe.retry().await {
            ConnectionStatus::Error(message) => assert!(message.contains("SUPABASE_URL")),
            other => panic!("unexpected status {:?}", other),
        }
    }
}
