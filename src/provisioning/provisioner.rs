//! Account creation on top of an open session.

use crate::ledger::session::SessionHandle;
use crate::ledger::types::{AccountIdentifier, AccountKind, AccountSpec, AccountStorageMode, LedgerError};
use crate::provisioning::error::ProvisionError;

/// Parameters of a fungible token faucet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaucetParams {
    pub storage_mode: AccountStorageMode,
    pub mutable: bool,
    pub token_symbol: String,
    pub decimals: u8,
    pub initial_supply: u64,
}

impl From<FaucetParams> for AccountSpec {
    fn from(params: FaucetParams) -> Self {
        AccountSpec::Faucet {
            storage_mode: params.storage_mode,
            mutable: params.mutable,
            token_symbol: params.token_symbol,
            decimals: params.decimals,
            initial_supply: params.initial_supply,
        }
    }
}

/// Requests account creation from a session and normalizes the reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountProvisioner;

impl AccountProvisioner {
    pub fn new() -> Self {
        Self
    }

    /// Create a wallet account.
    pub async fn provision_wallet(
        &self,
        session: &SessionHandle,
        storage_mode: AccountStorageMode,
        mutable: bool,
    ) -> Result<AccountIdentifier, ProvisionError> {
        self.provision(session, &AccountSpec::Wallet { storage_mode, mutable })
            .await
    }

    /// Create a fungible token faucet account.
    pub async fn provision_faucet(
        &self,
        session: &SessionHandle,
        params: FaucetParams,
    ) -> Result<AccountIdentifier, ProvisionError> {
        self.provision(session, &params.into()).await
    }

    /// Create any account described by `spec` and return its identifier.
    ///
    /// Nothing is returned unless the client reported a non-empty identifier.
    pub async fn provision(
        &self,
        session: &SessionHandle,
        spec: &AccountSpec,
    ) -> Result<AccountIdentifier, ProvisionError> {
        let kind = spec.kind();
        check_preconditions(spec)?;

        tracing::debug!(
            kind = %kind,
            storage_mode = %spec.storage_mode(),
            endpoint = %session.endpoint(),
            "Requesting account creation"
        );

        let client = session.client();
        let created = match spec {
            AccountSpec::Wallet {
                storage_mode,
                mutable,
            } => client.create_wallet(storage_mode, *mutable).await,
            AccountSpec::Faucet {
                storage_mode,
                mutable,
                token_symbol,
                decimals,
                initial_supply,
            } => {
                client
                    .create_faucet(storage_mode, *mutable, token_symbol, *decimals, *initial_supply)
                    .await
            }
        }
        .map_err(|e| classify(session, kind, e))?;

        let id = created.id().clone();
        if id.is_empty() {
            return Err(ProvisionError::Provisioning {
                kind,
                message: "ledger reported an empty account identifier".to_string(),
            });
        }

        tracing::info!(kind = %kind, account_id = %id, "Account created");
        Ok(id)
    }
}

fn check_preconditions(spec: &AccountSpec) -> Result<(), ProvisionError> {
    if let AccountSpec::Faucet { token_symbol, .. } = spec {
        // Length and alphabet limits belong to the ledger client.
        if token_symbol.trim().is_empty() {
            return Err(ProvisionError::Provisioning {
                kind: AccountKind::Faucet,
                message: "token symbol must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn classify(session: &SessionHandle, kind: AccountKind, err: LedgerError) -> ProvisionError {
    match err {
        LedgerError::Connection { message, .. } => ProvisionError::Connection {
            endpoint: session.endpoint().to_string(),
            message,
        },
        other => ProvisionError::Provisioning {
            kind,
            message: other.to_string(),
        },
    }
}
