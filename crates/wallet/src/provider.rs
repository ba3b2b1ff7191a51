//! Request-based wallet provider and its JSON-RPC over HTTP implementation.

use crate::error::{Result, WalletError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// EIP-1193 shaped provider: one `request` method taking an `eth_*` method
/// name and its positional parameters.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Human-readable location of the provider, for status output.
    fn describe(&self) -> String {
        "wallet provider".to_string()
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// Provider speaking JSON-RPC 2.0 over HTTP, e.g. a local Frame wallet or
/// any node endpoint that signs with unlocked accounts.
#[derive(Debug)]
pub struct JsonRpcProvider {
    endpoint: String,
    http_client: Client,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    /// `timeout` bounds every request, including ones waiting for the user
    /// to approve in the wallet.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, http_client))
    }

    pub fn with_client(endpoint: impl Into<String>, http_client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Extracts `result` from a JSON-RPC response body, turning an `error`
    /// member into [`WalletError::Rpc`].
    fn as_rpc_response(content: &str) -> Result<Value> {
        let response: Value = serde_json::from_str(content)?;
        let object = response
            .as_object()
            .ok_or_else(|| WalletError::InvalidResponse("Invalid response format".to_string()))?;

        if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(-32603);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(WalletError::rpc(code, message));
        }

        object
            .get("result")
            .cloned()
            .ok_or_else(|| WalletError::InvalidResponse("No result returned".to_string()))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(method, id = request.id, endpoint = %self.endpoint, "wallet request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let content = response.text().await?;
        trace!(%status, bytes = content.len(), "wallet response");

        match Self::as_rpc_response(&content) {
            Err(WalletError::InvalidResponse(_)) if !status.is_success() => Err(
                WalletError::InvalidResponse(format!("request failed with status {status}")),
            ),
            other => other,
        }
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
