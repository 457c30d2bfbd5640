//! Ledger client boundary.
//!
//! # Data Flow
//! ```text
//! Endpoint (from config)
//!     → session.rs (SessionHandle::open via a LedgerConnector)
//!     → client.rs (LedgerSession: create_wallet / create_faucet)
//!     → rpc.rs (JSON-RPC binding used by the binary)
//! ```
//!
//! # Constraints
//! - Everything behind `LedgerSession` is opaque: no proofs, no state, no keys here
//! - Sessions are opened per call and never shared
//! - Storage modes are passed through unchanged

pub mod client;
pub mod rpc;
pub mod session;
pub mod types;

pub use client::{LedgerConnector, LedgerSession};
pub use rpc::RpcConnector;
pub use session::SessionHandle;
pub use types::{
    AccountIdentifier, AccountKind, AccountSpec, AccountStorageMode, CreatedAccount, Endpoint,
    LedgerError, DEFAULT_NODE_ENDPOINT,
};
