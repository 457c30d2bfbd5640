//! JSON-RPC ledger client.
//!
//! # Responsibilities
//! - Open sessions by probing the node's `status` method
//! - Forward account creation requests as `new_wallet` / `new_faucet`
//! - Translate transport and JSON-RPC failures into `LedgerError`
//!
//! # Wire Format
//! ```text
//! → {"jsonrpc":"2.0","id":1,"method":"new_faucet","params":{...}}
//! ← {"jsonrpc":"2.0","id":1,"result":{"id":"0x..."}}
//! ← {"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"..."}}
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ledger::client::{LedgerConnector, LedgerSession};
use crate::ledger::types::{
    AccountIdentifier, AccountStorageMode, CreatedAccount, Endpoint, LedgerError, LedgerResult,
};

const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct AccountReply {
    id: String,
}

/// Connector that talks JSON-RPC over HTTP to a ledger node.
#[derive(Clone)]
pub struct RpcConnector {
    http: reqwest::Client,
    connect_timeout: Duration,
}

impl RpcConnector {
    /// Create a connector whose TCP connects give up after `connect_timeout`.
    pub fn new(connect_timeout: Duration) -> LedgerResult<Self> {
        // Nodes are addressed directly; HTTP(S)_PROXY is ignored.
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .no_proxy()
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            connect_timeout,
        })
    }
}

impl std::fmt::Debug for RpcConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcConnector")
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[async_trait]
impl LedgerConnector for RpcConnector {
    async fn connect(&self, endpoint: &Endpoint) -> LedgerResult<Box<dyn LedgerSession>> {
        let session = RpcSession {
            http: self.http.clone(),
            endpoint: endpoint.clone(),
            next_id: AtomicU64::new(1),
        };

        session
            .call("status", Value::Null)
            .await
            .map_err(|e| LedgerError::Connection {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(endpoint = %endpoint, "Node answered status probe");
        Ok(Box::new(session))
    }
}

/// A session bound to one node URL.
struct RpcSession {
    http: reqwest::Client,
    endpoint: Endpoint,
    next_id: AtomicU64,
}

impl RpcSession {
    async fn call(&self, method: &str, params: Value) -> LedgerResult<Value> {
        let request = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let res = self
            .http
            .post(self.endpoint.url().clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(LedgerError::Transport(format!(
                "node returned HTTP {}: {}",
                status, body
            )));
        }

        parse_response(&body)
    }

    async fn create_account(&self, method: &str, params: Value) -> LedgerResult<CreatedAccount> {
        let result = self.call(method, params).await?;
        let reply: AccountReply = serde_json::from_value(result)
            .map_err(|e| LedgerError::InvalidResponse(format!("{} result: {}", method, e)))?;

        Ok(CreatedAccount::new(AccountIdentifier::new(reply.id)))
    }
}

fn parse_response(body: &str) -> LedgerResult<Value> {
    let response: RpcResponse = serde_json::from_str(body)
        .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

    if let Some(err) = response.error {
        return Err(LedgerError::Rejected(format!("{} (code {})", err.message, err.code)));
    }

    response
        .result
        .ok_or_else(|| LedgerError::InvalidResponse("missing result".to_string()))
}

#[async_trait]
impl LedgerSession for RpcSession {
    async fn create_wallet(
        &self,
        storage_mode: &AccountStorageMode,
        mutable: bool,
    ) -> LedgerResult<CreatedAccount> {
        self.create_account(
            "new_wallet",
            json!({
                "storage_mode": storage_mode.as_str(),
                "mutable": mutable,
            }),
        )
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
        self.create_account(
            "new_faucet",
            json!({
                "storage_mode": storage_mode.as_str(),
                "mutable": mutable,
                "token_symbol": token_symbol,
                "decimals": decimals,
                // Decimal string so the full u64 range survives JSON number handling.
                "initial_supply": initial_supply.to_string(),
            }),
        )
        .await
    }
}
