//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ledger::types::{AccountStorageMode, DEFAULT_NODE_ENDPOINT};
use crate::provisioning::FaucetParams;

/// Root configuration for the provisioner service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Ledger node connection settings.
    pub ledger: LedgerConfig,

    /// Parameters used for the accounts the two triggers create.
    pub accounts: AccountsConfig,

    /// HTTP surface settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Ledger node connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LedgerConfig {
    /// URL of the node every session connects to.
    pub node_endpoint: String,

    /// TCP connect timeout of the JSON-RPC transport in seconds.
    pub connect_timeout_secs: u64,
}

impl LedgerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            node_endpoint: DEFAULT_NODE_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// Account parameters.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AccountsConfig {
    pub wallet: WalletConfig,
    pub faucet: FaucetConfig,
}

/// Wallet creation parameters.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WalletConfig {
    /// Storage mode passed to the ledger client.
    pub storage_mode: AccountStorageMode,

    /// Whether the wallet code can be updated later.
    pub mutable: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            storage_mode: AccountStorageMode::Private,
            mutable: true,
        }
    }
}

/// Faucet creation parameters.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FaucetConfig {
    /// Storage mode passed to the ledger client.
    pub storage_mode: AccountStorageMode,

    /// Whether the faucet code can be updated later.
    pub mutable: bool,

    /// Ticker of the issued token.
    pub token_symbol: String,

    /// Decimal places of the issued token.
    pub decimals: u8,

    /// Supply the faucet starts with (base units).
    pub initial_supply: u64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            storage_mode: AccountStorageMode::Private,
            mutable: false,
            token_symbol: "TOK".to_string(),
            decimals: 8,
            initial_supply: 1_000_000,
        }
    }
}

impl From<&FaucetConfig> for FaucetParams {
    fn from(config: &FaucetConfig) -> Self {
        FaucetParams {
            storage_mode: config.storage_mode.clone(),
            mutable: config.mutable,
            token_symbol: config.token_symbol.clone(),
            decimals: config.decimals,
            initial_supply: config.initial_supply,
        }
    }
}

/// HTTP surface settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8090").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8090".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
