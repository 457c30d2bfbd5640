//! HTTP interaction surface.
//!
//! # Routes
//! ```text
//! POST /api/wallet   → WorkflowController::request_wallet → 200 | 502 + WorkflowView
//! POST /api/faucet   → WorkflowController::request_faucet → 200 | 502 + WorkflowView
//! GET  /api/state    → current WorkflowView
//! GET  /api/health   → version + status
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
