//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + LEDGER_NODE_ENDPOINT
//!     → loader.rs (parse, env override)
//!     → validation.rs (semantic checks)
//!     → ProvisionerConfig (validated, immutable)
//!     → shared via ArcSwap to the workflow and HTTP layers
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → atomic swap of the shared config
//!     → next trigger observes the new endpoint
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Invalid reloads are logged and dropped

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AccountsConfig, FaucetConfig, LedgerConfig, ObservabilityConfig, ProvisionerConfig,
    ServerConfig, WalletConfig,
};
pub use watcher::{ConfigWatcher, SharedConfig};
