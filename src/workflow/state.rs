//! Workflow state and its presentation model.

use serde::{Deserialize, Serialize};

use crate::ledger::types::{AccountIdentifier, AccountKind};
use crate::provisioning::ProvisionError;

/// Last known outcome of the two provisioning triggers.
///
/// A finished attempt sets either its own identifier or `last_error`, never
/// both, and never touches the other kind's identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub wallet_id: Option<AccountIdentifier>,
    pub faucet_id: Option<AccountIdentifier>,
    pub last_error: Option<ProvisionError>,
}

impl WorkflowState {
    /// Identifier last stored for `kind`.
    pub fn id(&self, kind: AccountKind) -> Option<&AccountIdentifier> {
        match kind {
            AccountKind::Wallet => self.wallet_id.as_ref(),
            AccountKind::Faucet => self.faucet_id.as_ref(),
        }
    }

    /// Record a successful attempt.
    pub(crate) fn record_success(&mut self, kind: AccountKind, id: AccountIdentifier) {
        match kind {
            AccountKind::Wallet => self.wallet_id = Some(id),
            AccountKind::Faucet => self.faucet_id = Some(id),
        }
        self.last_error = None;
    }

    /// Record a failed attempt; identifiers stay as they were.
    pub(crate) fn record_failure(&mut self, err: ProvisionError) {
        self.last_error = Some(err);
    }

    /// Error text as shown to the user.
    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|e| e.to_string())
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView::from(self)
    }
}

/// Error as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorView {
    /// `connection_error` or `provisioning_error`.
    pub kind: String,
    pub message: String,
}

/// Presentation-ready snapshot of [`WorkflowState`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowView {
    pub wallet_id: Option<String>,
    pub faucet_id: Option<String>,
    pub wallet_message: Option<String>,
    pub faucet_message: Option<String>,
    pub error: Option<ErrorView>,
}

impl From<&WorkflowState> for WorkflowView {
    fn from(state: &WorkflowState) -> Self {
        let id = |kind: AccountKind| state.id(kind).map(|id| id.to_string());
        let banner = |kind: AccountKind, label: &str| {
            state
                .id(kind)
                .map(|id| format!("{} created with ID: {}", label, id))
        };

        Self {
            wallet_id: id(AccountKind::Wallet),
            faucet_id: id(AccountKind::Faucet),
            wallet_message: banner(AccountKind::Wallet, "Wallet"),
            faucet_message: banner(AccountKind::Faucet, "Faucet"),
            error: state.last_error.as_ref().map(|e| ErrorView {
                kind: e.label().to_string(),
                message: e.to_string(),
            }),
        }
    }
}
