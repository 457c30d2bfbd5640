//! Session bootstrap.

use crate::ledger::client::{LedgerConnector, LedgerSession};
use crate::ledger::types::{Endpoint, LedgerError};
use crate::observability::metrics;
use crate::provisioning::ProvisionError;

/// A live session with one ledger node.
///
/// Sessions are never pooled: every `open` creates a fresh connection and the
/// handle is dropped once the caller is done with it.
pub struct SessionHandle {
    endpoint: Endpoint,
    session: Box<dyn LedgerSession>,
}

impl SessionHandle {
    /// Open a session against `endpoint`.
    ///
    /// Any failure from the connector surfaces as `ProvisionError::Connection`.
    pub async fn open(
        connector: &dyn LedgerConnector,
        endpoint: &Endpoint,
    ) -> Result<Self, ProvisionError> {
        tracing::debug!(endpoint = %endpoint, "Opening ledger session");

        let session = connector.connect(endpoint).await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Ledger session could not be established");
            let message = match e {
                LedgerError::Connection { message, .. } => message,
                other => other.to_string(),
            };
            ProvisionError::Connection {
                endpoint: endpoint.to_string(),
                message,
            }
        })?;

        metrics::record_session_opened();
        tracing::debug!(endpoint = %endpoint, "Ledger session ready");
        Ok(Self {
            endpoint: endpoint.clone(),
            session,
        })
    }

    /// The endpoint this session is bound to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn client(&self) -> &dyn LedgerSession {
        self.session.as_ref()
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}
