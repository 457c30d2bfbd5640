//! Account provisioning.
//!
//! # Data Flow
//! ```text
//! SessionHandle + AccountSpec
//!     → provisioner.rs (precondition check, dispatch on kind)
//!     → LedgerSession::create_wallet / create_faucet
//!     → AccountIdentifier | ProvisionError
//! ```
//!
//! # Design Decisions
//! - Wallet and faucet share one code path; only the client call differs
//! - No local state is built until the client confirms an identifier

pub mod error;
pub mod provisioner;

pub use error::ProvisionError;
pub use provisioner::{AccountProvisioner, FaucetParams};
