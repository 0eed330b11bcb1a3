//! API Server Module
//!
//! This module implements a JSON-RPC server through which the ledger runtime
//! submits resolved transactions for contract verification. The server adds
//! no rules of its own: it decodes the transaction, runs the contract and
//! returns the verdict.

use crate::{
    config::{Config, ContractConfig},
    contract::{Contract, IouContract},
    LedgerTransaction,
};
use axum::{Router, routing::post, Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn, error};

/// Shared application state that is accessible across all request handlers
///
/// The contract is stateless, so concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    contract: Arc<IouContract>,
    settings: ContractConfig,
}

impl AppState {
    pub fn new(settings: ContractConfig) -> Self {
        Self {
            contract: Arc::new(IouContract::new()),
            settings,
        }
    }
}

/// The main API server struct
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let state = AppState::new(config.contract.clone());
        Self { config, state }
    }

    /// Starts the API server and begins listening for incoming requests
    ///
    /// # Returns
    /// `Ok(())` when the server shuts down, or an error if binding fails
    pub async fn start(self) -> anyhow::Result<()> {
        let app = router(self.state);

        let addr = format!("{}:{}", self.config.api.host, self.config.api.port);
        info!("Verification API listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Router with the single JSON-RPC endpoint at "/"
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .with_state(state)
}

/// JSON-RPC 2.0 request structure
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(default)]
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    id: Value,
}

/// JSON-RPC 2.0 response structure
///
/// Either `result` or `error` is populated, never both.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
    id: Value,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

/// Main RPC request handler, routing on the method name
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    info!("Received RPC request: {}", request.method);

    if request.jsonrpc != "2.0" {
        return Json(JsonRpcResponse::failure(request.id, -32600, "Invalid Request"));
    }

    match request.method.as_str() {
        "verifyTransaction" => handle_verify_transaction(state, request),
        _ => Json(JsonRpcResponse::failure(request.id, -32601, "Method not found")),
    }
}

/// Handles the "verifyTransaction" RPC method
///
/// A rejected transaction is still a successful call: the verdict carries the
/// rejection reason.
fn handle_verify_transaction(state: AppState, request: JsonRpcRequest) -> Json<JsonRpcResponse> {
    let tx: LedgerTransaction = match serde_json::from_value(request.params) {
        Ok(tx) => tx,
        Err(e) => {
            error!("Failed to deserialize transaction: {}", e);
            return Json(JsonRpcResponse::failure(
                request.id,
                -32602,
                format!("Invalid params: {}", e),
            ));
        }
    };

    let verdict = state.contract.verdict(&tx);
    if verdict.is_accepted() {
        if state.settings.log_accepted {
            info!("Transaction {:?} accepted by {}", verdict.tx_id, state.contract.id());
        }
    } else {
        warn!("Transaction {:?} rejected: {:?}", verdict.tx_id, verdict.status);
    }

    match serde_json::to_value(&verdict) {
        Ok(result) => Json(JsonRpcResponse::success(request.id, result)),
        Err(e) => {
            error!("Failed to encode verdict: {}", e);
            Json(JsonRpcResponse::failure(request.id, -32603, "Internal error"))
        }
    }
}
