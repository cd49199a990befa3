//! Minimal Ethereum JSON-RPC client.
//!
//! The assistant only reads chain state (`eth_call`, nonces, chain id), so a
//! thin reqwest client is enough; no signing happens server-side.

use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ChainError, ChainResult};

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read access to an EVM chain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// `eth_chainId`.
    async fn chain_id(&self) -> ChainResult<u64>;

    /// `eth_call` against the latest block; returns raw return data.
    async fn call(&self, to: Address, data: Vec<u8>) -> ChainResult<Vec<u8>>;

    /// `eth_getTransactionCount` for the pending block.
    async fn transaction_count(&self, address: Address) -> ChainResult<u64>;

    /// Whether the node answers at all.
    async fn is_connected(&self) -> bool {
        self.chain_id().await.is_ok()
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// JSON-RPC client over HTTP.
pub struct RpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> ChainResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ChainError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> ChainResult<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!(method, url = %self.url, "JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::NotConnected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(method, %status, "JSON-RPC HTTP failure");
            return Err(ChainError::HttpClient(format!("HTTP {status}: {body}")));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::HttpClient(format!("Failed to parse RPC response: {e}")))?;

        if let Some(err) = body.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = body.result.unwrap_or(Value::Null);
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl ChainReader for RpcClient {
    async fn chain_id(&self) -> ChainResult<u64> {
        let hex_id: String = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&hex_id)
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> ChainResult<Vec<u8>> {
        let params = json!([
            { "to": to.to_string(), "data": format!("0x{}", hex::encode(&data)) },
            "latest"
        ]);
        let result: String = self.request("eth_call", params).await?;
        decode_hex(&result)
    }

    async fn transaction_count(&self, address: Address) -> ChainResult<u64> {
        let count: String = self
            .request("eth_getTransactionCount", json!([address.to_string(), "pending"]))
            .await?;
        parse_quantity(&count)
    }
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(raw: &str) -> ChainResult<u64> {
    let digits = raw.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| ChainError::Abi(format!("Bad hex quantity {raw}: {e}")))
}

/// Decode `0x`-prefixed hex data.
pub fn decode_hex(raw: &str) -> ChainResult<Vec<u8>> {
    hex::decode(raw.trim_start_matches("0x"))
        .map_err(|e| ChainError::Abi(format!("Bad hex data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0xe").unwrap(), 14);
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0x").unwrap(), 0);
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("0x0a0b").unwrap(), vec![10, 11]);
        assert!(decode_hex("0x").unwrap().is_empty());
        assert!(decode_hex("0xabc").is_err());
    }

    #[test]
    fn test_request_serialization() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "eth_chainId",
            params: json!([]),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"jsonrpc":"2.0","id":7,"method":"eth_chainId","params":[]}"#
        );
    }

    #[test]
    fn test_error_response_parses() {
        let body: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap();
        assert!(body.result.is_none());
        assert_eq!(body.error.unwrap().code, -32000);
    }
}
