//! Ledger account provisioner.
//!
//! Serves the wallet and faucet workflows over HTTP and provisions accounts
//! through a JSON-RPC ledger client.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /api/wallet ─┐
//!   POST /api/faucet ─┼─▶ http ─▶ workflow::WorkflowController ─▶ provisioning::AccountProvisioner
//!   GET  /api/state  ─┘                  │                                   │
//!                                        │ WorkflowState                     ▼
//!                                        ▼                         ledger::SessionHandle
//!                                   WorkflowView                            │
//!                                                                           ▼
//!                                                              ledger::RpcConnector ─▶ node
//!
//!   config (TOML + LEDGER_NODE_ENDPOINT) ─▶ ArcSwap ◀─ ConfigWatcher (hot reload)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use ledger_provisioner::config::{loader, watcher, ConfigWatcher};
use ledger_provisioner::http::HttpServer;
use ledger_provisioner::ledger::RpcConnector;
use ledger_provisioner::lifecycle::{wait_for_signal, Shutdown};
use ledger_provisioner::observability;
use ledger_provisioner::workflow::WorkflowController;

#[derive(Parser)]
#[command(name = "ledger-provisioner", version)]
#[command(about = "Wallet and faucet provisioning service for a ledger node", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => loader::default_config()?,
    };

    observability::init_logging(&config.observability)?;

    tracing::info!("ledger-provisioner v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        node_endpoint = %config.ledger.node_endpoint,
        bind_address = %config.server.bind_address,
        config_file = ?args.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    let shared = watcher::shared(config.clone());

    // Keep the watcher alive for the lifetime of the server.
    let _config_watcher = match &args.config {
        Some(path) => {
            let (config_watcher, updates) = ConfigWatcher::new(path);
            let handle = config_watcher.run()?;
            tokio::spawn(watcher::apply_updates(
                shared.clone(),
                updates,
                shutdown.subscribe(),
            ));
            Some(handle)
        }
        None => None,
    };

    let connector = Arc::new(RpcConnector::new(config.ledger.connect_timeout())?);
    let controller = Arc::new(WorkflowController::new(shared, connector));

    let listener = TcpListener::bind(&config.server.bind_address).await?;

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        signal_shutdown.trigger();
    });

    HttpServer::new(controller).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
