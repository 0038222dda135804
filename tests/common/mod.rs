//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Account the mock node reports first from `eth_accounts`.
pub const NODE_ACCOUNT: &str = "0xee88da44b4901d7f86970c52dc5139af80c83edd";

/// Address the mock node reports for every contract creation.
pub const CREATED_CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

pub const TX_HASH: &str = "0x1111111111111111111111111111111111111111111111111111111111111111";

/// A JSON-RPC request seen by the mock node.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

#[derive(Clone)]
struct NodeState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    unlock_result: bool,
}

/// Minimal Ethereum node answering the calls a migration makes.
pub struct MockNode {
    pub url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[allow(dead_code)]
impl MockNode {
    pub async fn start() -> Self {
        Self::start_with_unlock(true).await
    }

    /// Start a node whose `personal_unlockAccount` answers `unlock_result`.
    pub async fn start_with_unlock(unlock_result: bool) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = NodeState {
            calls: calls.clone(),
            unlock_result,
        };
        let app = Router::new().route("/", post(handle)).with_state(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}", addr),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }
}

async fn handle(State(state): State<NodeState>, Json(request): Json<Value>) -> Json<Value> {
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();
    state.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        params,
    });

    let id = request["id"].clone();
    let body = match result_for(&method, state.unlock_result) {
        Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {method} not found") }
        }),
    };
    Json(body)
}

fn result_for(method: &str, unlock_result: bool) -> Option<Value> {
    let result = match method {
        "eth_accounts" => json!([NODE_ACCOUNT]),
        "eth_chainId" => json!("0x539"),
        "eth_blockNumber" => json!("0x2"),
        "eth_gasPrice" => json!("0x4a817c800"),
        "eth_estimateGas" => json!("0x5208"),
        "eth_getTransactionCount" => json!("0x0"),
        "personal_unlockAccount" => json!(unlock_result),
        "eth_sendTransaction" => json!(TX_HASH),
        "eth_getTransactionReceipt" => receipt(),
        _ => return None,
    };
    Some(result)
}

fn receipt() -> Value {
    json!({
        "type": "0x0",
        "status": "0x1",
        "cumulativeGasUsed": "0x2bf20",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": "0x2222222222222222222222222222222222222222222222222222222222222222",
        "blockNumber": "0x1",
        "gasUsed": "0x2bf20",
        "effectiveGasPrice": "0x4a817c800",
        "from": NODE_ACCOUNT,
        "to": null,
        "contractAddress": CREATED_CONTRACT
    })
}
