//! Wallet and faucet provisioning front-end for a ledger node.

pub mod config;
pub mod http;
pub mod ledger;
pub mod lifecycle;
pub mod observability;
pub mod provisioning;
pub mod workflow;

pub use config::schema::ProvisionerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use workflow::WorkflowController;
