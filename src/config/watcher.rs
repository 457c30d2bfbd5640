//! Configuration file watcher for hot reload.
//!
//! Reloaded configs land in a shared [`SharedConfig`]; the next provisioning
//! trigger picks up the new endpoint and account parameters. Triggers already
//! in flight keep the values they started with.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc};

use crate::config::loader::load_config;
use crate::config::schema::ProvisionerConfig;

/// Configuration shared between the reload task and its readers.
pub type SharedConfig = Arc<ArcSwap<ProvisionerConfig>>;

/// Wrap a configuration for sharing.
pub fn shared(config: ProvisionerConfig) -> SharedConfig {
    Arc::new(ArcSwap::from_pointee(config))
}

/// Watches the configuration file and publishes every valid new version.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ProvisionerConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path` and the receiver its updates arrive on.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ProvisionerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = ?path, "Config file change detected, reloading");
                    match load_config(&path) {
                        Ok(new_config) => {
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Failed to reload config, keeping current configuration"
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Swap every received config into `target` until shutdown or channel close.
pub async fn apply_updates(
    target: SharedConfig,
    mut updates: mpsc::UnboundedReceiver<ProvisionerConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(new_config) = update else { break };
                let old_endpoint = target.load().ledger.node_endpoint.clone();
                if old_endpoint != new_config.ledger.node_endpoint {
                    tracing::info!(
                        from = %old_endpoint,
                        to = %new_config.ledger.node_endpoint,
                        "Node endpoint changed"
                    );
                }
                target.store(Arc::new(new_config));
                tracing::info!("Configuration reloaded");
            }
            _ = shutdown.recv() => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_updates_swaps_config() {
        let target = shared(ProvisionerConfig::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let mut next = ProvisionerConfig::default();
        next.ledger.node_endpoint = "http://10.1.2.3:57291".into();
        tx.send(next).unwrap();
        drop(tx);

        apply_updates(target.clone(), rx, shutdown_rx).await;
        drop(shutdown_tx);

        assert_eq!(target.load().ledger.node_endpoint, "http://10.1.2.3:57291");
    }
}
