//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the filter: `RUST_LOG` wins, otherwise the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Fields carry kind, endpoint, attempt id and account id, never free-form blobs

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter directive used when `RUST_LOG` is absent.
pub fn default_directive(level: &str) -> String {
    format!("ledger_provisioner={level},tower_http={level}")
}

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level.to_ascii_lowercase())));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
