//! Minimal JSON-RPC 2.0 plumbing shared by the prover and chain clients.

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcError>,
}

/// POST one JSON-RPC call and unwrap the result.
///
/// A JSON-RPC error object is surfaced verbatim; `result: null` with no error
/// maps to `Value::Null` (receipt polling relies on that).
pub(crate) async fn call(
    http: &reqwest::Client,
    url: &str,
    method: &str,
    params: Value,
) -> Result<Value, ClientError> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method,
        params,
    };

    let response = http
        .post(url)
        .json(&request)
        .send()
        .await
        .map_err(|source| ClientError::Http {
            endpoint: format!("{url} {method}"),
            source,
        })?;

    let body: RpcResponse = response.json().await.map_err(|source| ClientError::Http {
        endpoint: format!("{url} {method}"),
        source,
    })?;

    unwrap_response(body, format!("{url} {method}"))
}

/// Turn a decoded envelope into the result value.
///
/// An error object wins over any result; an absent or `null` result with no
/// error is a legitimate `Value::Null` (how `eth_getTransactionReceipt`
/// reports a not-yet-mined transaction).
fn unwrap_response(body: RpcResponse, endpoint: String) -> Result<Value, ClientError> {
    if let Some(error) = body.error {
        return Err(ClientError::Rpc {
            endpoint,
            code: error.code,
            message: error.message,
        });
    }
    Ok(body.result.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_shape() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_blockNumber",
            params: json!([]),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "eth_blockNumber", "params": []})
        );
    }

    #[test]
    fn success_response_yields_result() {
        let body: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": "0x10"})).unwrap();
        let value = unwrap_response(body, "node eth_blockNumber".to_string()).unwrap();
        assert_eq!(value, json!("0x10"));
    }

    #[test]
    fn error_object_maps_to_rpc_error() {
        let body: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "execution reverted"},
        }))
        .unwrap();
        let err = unwrap_response(body, "node eth_estimateGas".to_string()).unwrap_err();
        match err {
            ClientError::Rpc { endpoint, code, message } => {
                assert_eq!(endpoint, "node eth_estimateGas");
                assert_eq!(code, -32000);
                assert_eq!(message, "execution reverted");
            }
            other => panic!("expected Rpc error, got {other}"),
        }
    }

    #[test]
    fn null_and_missing_result_decode_to_null() {
        // Receipt polling treats both shapes as "no receipt yet".
        let explicit: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();
        assert!(unwrap_response(explicit, "node".to_string()).unwrap().is_null());

        let missing: RpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert!(unwrap_response(missing, "node".to_string()).unwrap().is_null());
    }
}
