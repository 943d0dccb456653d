//! # Status Commands
//!
//! Connection probe, per-operation status and the error banner.

use serde::Serialize;

use crate::state::{ConnectionProbe, ConnectionStatus, Operation, OperationStatus, RegistryState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDto {
    pub operation: String,
    pub state: String,
    pub message: Option<String>,
}

impl OperationDto {
    fn new(op: Operation, status: OperationStatus) -> Self {
        let (state, message) = match status {
            OperationStatus::Idle => ("idle", None),
            OperationStatus::Loading => ("loading", None),
            OperationStatus::Failed(message) => ("failed", Some(message)),
        };
        OperationDto {
            operation: format!("{:?}", op),
            state: state.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub connection: ConnectionStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub operations: Vec<OperationDto>,
}

/// Snapshot of everything the status bar shows. Does not probe.
pub fn get_status(probe: &ConnectionProbe, state: Option<&RegistryState>) -> StatusDto {
    StatusDto {
        connection: probe.status(),
        loading: state.is_some_and(RegistryState::loading),
        error: state.and_then(RegistryState::error),
        operations: state
            .map(|s| {
                Operation::ALL
                    .into_iter()
                    .map(|op| OperationDto::new(op, s.status(op)))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Runs the probe again.
pub async fn retry_connection(probe: &ConnectionProbe) -> ConnectionStatus {
    probe.retry().await
}

pub fn dismiss_error(state: &RegistryState) {
    state.dismiss_error();
}
