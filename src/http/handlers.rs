use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::ledger::types::AccountKind;
use crate::workflow::{WorkflowState, WorkflowView};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub version: String,
    pub status: String,
}

/// `POST /api/wallet`
pub async fn create_wallet(State(state): State<AppState>) -> (StatusCode, Json<WorkflowView>) {
    // Detached: a client hanging up must not cancel the ledger call.
    let snapshot = state.controller.run_detached(AccountKind::Wallet).await;
    respond(snapshot)
}

/// `POST /api/faucet`
pub async fn create_faucet(State(state): State<AppState>) -> (StatusCode, Json<WorkflowView>) {
    let snapshot = state.controller.run_detached(AccountKind::Faucet).await;
    respond(snapshot)
}

/// `GET /api/state`
pub async fn get_state(State(state): State<AppState>) -> Json<WorkflowView> {
    Json(state.controller.view())
}

/// `GET /api/health`
pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
    })
}

// The snapshot is taken at commit time, so `last_error` belongs to this attempt.
fn respond(snapshot: WorkflowState) -> (StatusCode, Json<WorkflowView>) {
    let status = if snapshot.last_error.is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(snapshot.view()))
}
