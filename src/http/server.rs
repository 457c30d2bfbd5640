//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router for the workflow endpoints
//! - Wire up request tracing
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{create_faucet, create_wallet, get_health, get_state};
use crate::lifecycle::Shutdown;
use crate::workflow::WorkflowController;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<WorkflowController>,
}

/// HTTP front-end for the provisioning workflows.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(controller: Arc<WorkflowController>) -> Self {
        let router = Self::build_router(AppState { controller });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api/wallet", post(create_wallet))
            .route("/api/faucet", post(create_faucet))
            .route("/api/state", get(get_state))
            .route("/api/health", get(get_health))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// In-flight triggers are allowed to finish before this returns.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signaled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{watcher, ProvisionerConfig};
    use crate::ledger::client::{LedgerConnector, LedgerSession};
    use crate::ledger::types::{
        AccountIdentifier, AccountStorageMode, CreatedAccount, Endpoint, LedgerError, LedgerResult,
    };
    use crate::workflow::WorkflowView;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;
    use tower::ServiceExt;

    struct RejectingFaucets;

    #[async_trait]
    impl LedgerSession for RejectingFaucets {
        async fn create_wallet(
            &self,
            _storage_mode: &AccountStorageMode,
            _mutable: bool,
        ) -> LedgerResult<CreatedAccount> {
            Ok(CreatedAccount::new(AccountIdentifier::new("0x5e1f")))
        }

        async fn create_faucet(
            &self,
            _storage_mode: &AccountStorageMode,
            _mutable: bool,
            _token_symbol: &str,
            _decimals: u8,
            _initial_supply: u64,
        ) -> LedgerResult<CreatedAccount> {
            Err(LedgerError::Rejected("faucets disabled on this node".into()))
        }
    }

    #[async_trait]
    impl LedgerConnector for RejectingFaucets {
        async fn connect(&self, _endpoint: &Endpoint) -> LedgerResult<Box<dyn LedgerSession>> {
            Ok(Box::new(RejectingFaucets))
        }
    }

    fn router() -> Router {
        let controller = WorkflowController::new(
            watcher::shared(ProvisionerConfig::default()),
            Arc::new(RejectingFaucets),
        );
        HttpServer::build_router(AppState {
            controller: Arc::new(controller),
        })
    }

    async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, WorkflowView) {
        let res = router
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_wallet_endpoint() {
        let router = router();
        let (status, view) = send(&router, "POST", "/api/wallet").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view.wallet_id.as_deref(), Some("0x5e1f"));
        assert_eq!(view.wallet_message.as_deref(), Some("Wallet created with ID: 0x5e1f"));
    }

    #[tokio::test]
    async fn test_faucet_failure_is_bad_gateway() {
        let router = router();
        send(&router, "POST", "/api/wallet").await;

        let (status, view) = send(&router, "POST", "/api/faucet").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(view.faucet_id.is_none());
        assert_eq!(view.wallet_id.as_deref(), Some("0x5e1f"));
        let error = view.error.unwrap();
        assert_eq!(error.kind, "provisioning_error");
        assert!(error.message.contains("faucets disabled"));

        let (status, state) = send(&router, "GET", "/api/state").await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.error.is_some());
    }

    /// Reports the wallet as created on the node before the reply is ready.
    #[derive(Clone, Default)]
    struct SlowWallets {
        created: Arc<AtomicBool>,
    }

    #[async_trait]
    impl LedgerSession for SlowWallets {
        async fn create_wallet(
            &self,
            _storage_mode: &AccountStorageMode,
            _mutable: bool,
        ) -> LedgerResult<CreatedAccount> {
            self.created.store(true, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(300)).await;
            Ok(CreatedAccount::new(AccountIdentifier::new("0xcreated")))
        }

        async fn create_faucet(
            &self,
            _storage_mode: &AccountStorageMode,
            _mutable: bool,
            _token_symbol: &str,
            _decimals: u8,
            _initial_supply: u64,
        ) -> LedgerResult<CreatedAccount> {
            Err(LedgerError::Rejected("unused".into()))
        }
    }

    #[async_trait]
    impl LedgerConnector for SlowWallets {
        async fn connect(&self, _endpoint: &Endpoint) -> LedgerResult<Box<dyn LedgerSession>> {
            Ok(Box::new(self.clone()))
        }
    }

    #[tokio::test]
    async fn test_client_disconnect_does_not_lose_attempt() {
        let ledger = SlowWallets::default();
        let controller = Arc::new(WorkflowController::new(
            watcher::shared(ProvisionerConfig::default()),
            Arc::new(ledger.clone()),
        ));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let server = tokio::spawn(HttpServer::new(controller.clone()).run(listener, shutdown.clone()));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"POST /api/wallet HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(stream);

        tokio::time::sleep(Duration::from_millis(800)).await;

        assert!(ledger.created.load(Ordering::SeqCst));
        let state = controller.state();
        assert_eq!(state.wallet_id, Some(AccountIdentifier::new("0xcreated")));
        assert!(state.last_error.is_none());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let res = router()
            .oneshot(Request::builder().uri("/api/wallet").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
