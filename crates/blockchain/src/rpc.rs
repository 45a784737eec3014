use alloy_primitives::U256;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::debug;

/// EIP-1193 code a wallet returns when the user rejects a request.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcFailure {
    #[error("Failed to send RPC request: {0}")]
    Transport(String),

    #[error("RPC request failed with status: {0}")]
    Status(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed RPC response: {0}")]
    Malformed(String),
}

impl RpcFailure {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, RpcFailure::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }
}

/// Minimal JSON-RPC 2.0 client over HTTP.
pub struct JsonRpcClient {
    url: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcFailure> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, url = %self.url, "JSON-RPC call");

        let request_body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });

        let response = self
            .http
            .post(&self.url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RpcFailure::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RpcFailure::Status(response.status().as_u16()));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| RpcFailure::Malformed(e.to_string()))?;

        parse_response(response_json)
    }
}

/// Extract `result` from a JSON-RPC response, surfacing the `error` object if present.
/// A `null` result is returned as `Value::Null`.
pub fn parse_response(response: Value) -> Result<Value, RpcFailure> {
    if let Some(error) = response.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(-32603);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        return Err(RpcFailure::Rpc { code, message });
    }

    response
        .get("result")
        .cloned()
        .ok_or_else(|| RpcFailure::Malformed("missing result".to_string()))
}

/// Parse a hex quantity such as `"0x1bc16d674ec80000"`.
pub fn parse_quantity(value: &Value) -> Result<U256, RpcFailure> {
    let text = value
        .as_str()
        .ok_or_else(|| RpcFailure::Malformed(format!("expected hex quantity, got {}", value)))?;
    let digits = text.strip_prefix("0x").unwrap_or(text);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| RpcFailure::Malformed(format!("invalid quantity {}: {}", text, e)))
}

pub fn to_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_response_result() {
        let value = parse_response(json!({"jsonrpc": "2.0", "id": 1, "result": "0x10"})).unwrap();
        assert_eq!(value, json!("0x10"));
    }

    #[test]
    fn test_parse_response_null_result() {
        let value = parse_response(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_parse_response_error_code() {
        let err = parse_response(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 4001, "message": "User rejected the request."}
        }))
        .unwrap_err();
        assert!(err.is_user_rejection());
    }

    #[test]
    fn test_parse_response_missing_result() {
        let err = parse_response(json!({"jsonrpc": "2.0", "id": 1})).unwrap_err();
        assert!(matches!(err, RpcFailure::Malformed(_)));
        assert!(!err.is_user_rejection());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&json!("0x0")).unwrap(), U256::ZERO);
        assert_eq!(parse_quantity(&json!("0x")).unwrap(), U256::ZERO);
        assert_eq!(
            parse_quantity(&json!("0x16345785d8a0000")).unwrap(),
            U256::from(100_000_000_000_000_000u64)
        );
        assert!(parse_quantity(&json!(12)).is_err());
        assert!(parse_quantity(&json!("0xzz")).is_err());
    }

    #[test]
    fn test_to_quantity() {
        assert_eq!(to_quantity(U256::ZERO), "0x0");
        assert_eq!(to_quantity(U256::from(255u64)), "0xff");
    }
}
