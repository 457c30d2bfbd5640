//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use ledger_provisioner::config::{watcher, ProvisionerConfig, SharedConfig};
use ledger_provisioner::ledger::types::LedgerResult;
use ledger_provisioner::ledger::{
    AccountIdentifier, AccountStorageMode, CreatedAccount, Endpoint, LedgerConnector, LedgerError,
    LedgerSession,
};
use ledger_provisioner::WorkflowController;

/// A request the scripted ledger received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Wallet {
        storage_mode: String,
        mutable: bool,
    },
    Faucet {
        storage_mode: String,
        mutable: bool,
        token_symbol: String,
        decimals: u8,
        initial_supply: u64,
    },
}

struct Reply {
    delay: Duration,
    outcome: Result<String, String>,
}

#[derive(Default)]
struct Script {
    refuse_connect: AtomicBool,
    sessions: AtomicU32,
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

/// In-process ledger client answering from a queue of scripted replies.
#[derive(Clone, Default)]
pub struct ScriptedLedger {
    script: Arc<Script>,
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refuse_connections(&self, refuse: bool) {
        self.script.refuse_connect.store(refuse, Ordering::SeqCst);
    }

    pub fn push_ok(&self, id: &str) {
        self.push_ok_after(id, Duration::ZERO);
    }

    pub fn push_ok_after(&self, id: &str, delay: Duration) {
        self.script.replies.lock().unwrap().push_back(Reply {
            delay,
            outcome: Ok(id.to_string()),
        });
    }

    pub fn push_reject(&self, message: &str) {
        self.script.replies.lock().unwrap().push_back(Reply {
            delay: Duration::ZERO,
            outcome: Err(message.to_string()),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.calls.lock().unwrap().clone()
    }

    pub fn sessions_opened(&self) -> u32 {
        self.script.sessions.load(Ordering::SeqCst)
    }

    async fn answer(&self, call: Call) -> LedgerResult<CreatedAccount> {
        self.script.calls.lock().unwrap().push(call);
        let reply = self.script.replies.lock().unwrap().pop_front();

        let Some(reply) = reply else {
            return Err(LedgerError::Rejected("no scripted reply".into()));
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply
            .outcome
            .map(|id| CreatedAccount::new(AccountIdentifier::new(id)))
            .map_err(LedgerError::Rejected)
    }
}

#[async_trait]
impl LedgerConnector for ScriptedLedger {
    async fn connect(&self, endpoint: &Endpoint) -> LedgerResult<Box<dyn LedgerSession>> {
        if self.script.refuse_connect.load(Ordering::SeqCst) {
            return Err(LedgerError::Connection {
                endpoint: endpoint.to_string(),
                message: "node unreachable".into(),
            });
        }
        self.script.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl LedgerSession for ScriptedLedger {
    async fn create_wallet(
        &self,
        storage_mode: &AccountStorageMode,
        mutable: bool,
    ) -> LedgerResult<CreatedAccount> {
        self.answer(Call::Wallet {
            storage_mode: storage_mode.to_string(),
            mutable,
        })
        .await
    }

    async fn create_faucet(
        &self,
        storage_mode: &AccountStorageMode,
        mutable: bool,
        token_symbol: &str,
        decimals: u8,
        initial_supply: u64,
    ) -> LedgerResult<CreatedAccount> {
        self.answer(Call::Faucet {
            storage_mode: storage_mode.to_string(),
            mutable,
            token_symbol: token_symbol.to_string(),
            decimals,
            initial_supply,
        })
        .await
    }
}

/// Controller over `ledger` with default configuration.
pub fn controller_with(ledger: &ScriptedLedger) -> (WorkflowController, SharedConfig) {
    controller_with_config(ledger, ProvisionerConfig::default())
}

pub fn controller_with_config(
    ledger: &ScriptedLedger,
    config: ProvisionerConfig,
) -> (WorkflowController, SharedConfig) {
    let shared = watcher::shared(config);
    let controller = WorkflowController::new(shared.clone(), Arc::new(ledger.clone()));
    (controller, shared)
}

/// JSON-RPC requests a mock node has received.
pub type RequestLog = Arc<Mutex<Vec<Value>>>;

/// Start a mock ledger node speaking the JSON-RPC dialect of `RpcConnector`.
///
/// Faucet symbols longer than six characters are rejected the way a real
/// node would.
pub async fn start_mock_node() -> (SocketAddr, RequestLog) {
    let log: RequestLog = Arc::default();
    let app = Router::new()
        .route("/", post(mock_node_handler))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, log)
}

async fn mock_node_handler(State(log): State<RequestLog>, Json(request): Json<Value>) -> Json<Value> {
    log.lock().unwrap().push(request.clone());
    let id = request["id"].clone();
    let n = log.lock().unwrap().len();

    let body = match request["method"].as_str() {
        Some("status") => json!({"jsonrpc": "2.0", "id": id, "result": {"version": "0.7.0"}}),
        Some("new_wallet") => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {"id": format!("0x{:016x}", 0xa11ce000u64 + n as u64)},
        }),
        Some("new_faucet") => {
            let symbol = request["params"]["token_symbol"].as_str().unwrap_or_default();
            if symbol.len() > 6 {
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": -32602, "message": format!("invalid token symbol '{}'", symbol)},
                })
            } else {
                json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "result": {"id": format!("0x{:016x}", 0xfa0ce000u64 + n as u64)},
                })
            }
        }
        _ => json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32601, "message": "method not found"}}),
    };

    Json(body)
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
