//! User-triggered provisioning workflows.
//!
//! # Data Flow
//! ```text
//! POST /api/wallet | POST /api/faucet
//!     → controller.rs (new session, provision, commit)
//!     → state.rs (WorkflowState → WorkflowView)
//!     → JSON view back to the caller
//! ```
//!
//! # Design Decisions
//! - The wallet and faucet triggers are independent; neither resets the other
//! - Every failure path ends in `last_error`; nothing escapes a trigger
//! - Overlapping triggers are last-writer-wins

pub mod controller;
pub mod state;

pub use controller::WorkflowController;
pub use state::{ErrorView, WorkflowState, WorkflowView};
