//! Capability traits for the external ledger client.
//!
//! # Responsibilities
//! - Describe the only calls this crate makes into a ledger client
//! - Keep connection setup (`LedgerConnector`) apart from account calls (`LedgerSession`)
//!
//! # Design Decisions
//! - Object safe (`async_trait`) so the binary and tests can swap clients at runtime
//! - Parameters are passed through untouched; validation beyond the basics is the client's job

use async_trait::async_trait;

use crate::ledger::types::{AccountStorageMode, CreatedAccount, Endpoint, LedgerResult};

/// Opens sessions against a ledger node.
#[async_trait]
pub trait LedgerConnector: Send + Sync {
    /// Establish a ready-to-use session bound to `endpoint`.
    ///
    /// Each call yields an independent session.
    async fn connect(&self, endpoint: &Endpoint) -> LedgerResult<Box<dyn LedgerSession>>;
}

/// One established connection to a ledger node.
#[async_trait]
pub trait LedgerSession: Send + Sync {
    /// Create a wallet account.
    async fn create_wallet(
        &self,
        storage_mode: &AccountStorageMode,
        mutable: bool,
    ) -> LedgerResult<CreatedAccount>;

    /// Create a fungible token faucet account.
    async fn create_faucet(
        &self,
        storage_mode: &AccountStorageMode,
        mutable: bool,
        token_symbol: &str,
        decimals: u8,
        initial_supply: u64,
    ) -> LedgerResult<CreatedAccount>;
}
