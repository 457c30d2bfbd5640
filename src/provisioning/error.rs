//! Provisioning error taxonomy.

use thiserror::Error;

use crate::ledger::types::AccountKind;

/// Why a provisioning attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    /// No session could be established with the node.
    #[error("connection to {endpoint} failed: {message}")]
    Connection { endpoint: String, message: String },

    /// The ledger client rejected or could not complete account creation.
    #[error("{kind} provisioning failed: {message}")]
    Provisioning { kind: AccountKind, message: String },
}

impl ProvisionError {
    /// Short label used for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            ProvisionError::Connection { .. } => "connection_error",
            ProvisionError::Provisioning { .. } => "provisioning_error",
        }
    }
}
