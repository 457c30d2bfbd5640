//! Trigger handling for the wallet and faucet workflows.
//!
//! # Responsibilities
//! - Open a fresh session for every trigger
//! - Run the matching provisioning call with the configured parameters
//! - Commit the outcome into `WorkflowState` and log failures once
//!
//! # Concurrency
//! The state mutex is held only to read or to commit a finished attempt, never
//! across a ledger call. Two overlapping triggers of the same kind both run to
//! completion and whichever finishes last overwrites the stored identifier.
//! There is no retry or timeout at this layer. Callers that may be dropped
//! mid-attempt (HTTP handlers) go through [`WorkflowController::run_detached`]
//! so the attempt still reaches `commit`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use uuid::Uuid;

use crate::config::SharedConfig;
use crate::ledger::client::LedgerConnector;
use crate::ledger::session::SessionHandle;
use crate::ledger::types::{AccountIdentifier, AccountKind, AccountSpec, Endpoint};
use crate::observability::metrics;
use crate::provisioning::{AccountProvisioner, FaucetParams, ProvisionError};
use crate::workflow::state::{WorkflowState, WorkflowView};

/// Owns the workflow state and runs the two provisioning triggers.
pub struct WorkflowController {
    config: SharedConfig,
    connector: Arc<dyn LedgerConnector>,
    provisioner: AccountProvisioner,
    state: Mutex<WorkflowState>,
}

impl WorkflowController {
    pub fn new(config: SharedConfig, connector: Arc<dyn LedgerConnector>) -> Self {
        Self {
            config,
            connector,
            provisioner: AccountProvisioner::new(),
            state: Mutex::new(WorkflowState::default()),
        }
    }

    /// Create a wallet with the configured parameters.
    ///
    /// Returns the state right after this attempt was committed.
    pub async fn request_wallet(&self) -> WorkflowState {
        let wallet = self.config.load().accounts.wallet.clone();
        self.trigger(AccountSpec::Wallet {
            storage_mode: wallet.storage_mode,
            mutable: wallet.mutable,
        })
        .await
    }

    /// Create a faucet with the configured parameters.
    ///
    /// Returns the state right after this attempt was committed.
    pub async fn request_faucet(&self) -> WorkflowState {
        let params = FaucetParams::from(&self.config.load().accounts.faucet);
        self.trigger(params.into()).await
    }

    /// Run the trigger for `kind`.
    pub async fn request(&self, kind: AccountKind) -> WorkflowState {
        match kind {
            AccountKind::Wallet => self.request_wallet().await,
            AccountKind::Faucet => self.request_faucet().await,
        }
    }

    /// Run the trigger for `kind` on its own task.
    ///
    /// Dropping the returned future does not cancel the attempt. If the task
    /// itself dies, the failure is committed as a provisioning error.
    pub async fn run_detached(self: Arc<Self>, kind: AccountKind) -> WorkflowState {
        let controller = Arc::clone(&self);
        let task = tokio::spawn(async move { controller.request(kind).await });

        match task.await {
            Ok(state) => state,
            Err(e) => self.commit(
                Uuid::new_v4(),
                kind,
                Err(ProvisionError::Provisioning {
                    kind,
                    message: format!("provisioning task did not finish: {}", e),
                }),
            ),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> WorkflowState {
        self.lock().clone()
    }

    /// Current presentation model.
    pub fn view(&self) -> WorkflowView {
        self.lock().view()
    }

    async fn trigger(&self, spec: AccountSpec) -> WorkflowState {
        let kind = spec.kind();
        let attempt = Uuid::new_v4();
        let node_endpoint = self.config.load().ledger.node_endpoint.clone();
        let started = Instant::now();

        tracing::info!(
            attempt = %attempt,
            kind = %kind,
            endpoint = %node_endpoint,
            "Provisioning requested"
        );

        let outcome = self.provision(&node_endpoint, &spec).await;

        let label = match &outcome {
            Ok(_) => "success",
            Err(e) => e.label(),
        };
        metrics::record_attempt(kind, label, started.elapsed());

        self.commit(attempt, kind, outcome)
    }

    async fn provision(
        &self,
        node_endpoint: &str,
        spec: &AccountSpec,
    ) -> Result<AccountIdentifier, ProvisionError> {
        let endpoint = Endpoint::parse(node_endpoint).map_err(|e| ProvisionError::Connection {
            endpoint: node_endpoint.to_string(),
            message: e.reason,
        })?;

        let session = SessionHandle::open(self.connector.as_ref(), &endpoint).await?;
        self.provisioner.provision(&session, spec).await
    }

    fn commit(
        &self,
        attempt: Uuid,
        kind: AccountKind,
        outcome: Result<AccountIdentifier, ProvisionError>,
    ) -> WorkflowState {
        let mut state = self.lock();
        match outcome {
            Ok(id) => {
                tracing::info!(attempt = %attempt, kind = %kind, account_id = %id, "Provisioning succeeded");
                state.record_success(kind, id);
            }
            Err(e) => {
                tracing::error!(
                    attempt = %attempt,
                    kind = %kind,
                    error_kind = e.label(),
                    error = %e,
                    "Provisioning failed"
                );
                state.record_failure(e);
            }
        }
        state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        // State is replaced wholesale on commit, so a poisoned guard is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowController")
            .field("node_endpoint", &self.config.load().ledger.node_endpoint)
            .field("state", &*self.lock())
            .finish()
    }
}
