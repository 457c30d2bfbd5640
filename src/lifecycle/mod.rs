//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Build controller → Bind listener
//!
//! Shutdown:
//!     signals.rs (SIGTERM/SIGINT) → shutdown.rs broadcast
//!         → HTTP server drains, config reload task exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
