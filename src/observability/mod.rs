//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ledger / provisioning / workflow / http
//!     → logging.rs (structured log events)
//!     → metrics.rs (attempt counters, latency histogram)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
