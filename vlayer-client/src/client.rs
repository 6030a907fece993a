//! Client for the external vlayer-style proving service.
//!
//! The service accepts a call specification (`v_call`), hands back a job hash,
//! and later yields a proof plus the decoded call outputs through
//! `v_getProofReceipt`. This client adds no retry policy of its own beyond
//! the bounded result poll; a rejected or failed job is surfaced verbatim.

use crate::error::ClientError;
use crate::rpc;
use crate::types::{Address, Proof, U256};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// How long the proving result poll runs before giving up: 120 × 1s.
const PROOF_POLL_ATTEMPTS: u32 = 120;
const PROOF_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// One prover invocation: which contract function to prove, for which inputs.
#[derive(Clone, Debug)]
pub struct ProveCall {
    /// Prover contract the service executes.
    pub address: Address,
    /// ABI-encoded calldata (selector + arguments).
    pub calldata: Vec<u8>,
    /// Chain the assumptions settle on.
    pub chain_id: u64,
    /// Gas limit for the proved execution.
    pub gas_limit: u64,
}

/// Job handle returned by `v_call`.
#[derive(Clone, Debug, Deserialize)]
pub struct ProofHash(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Queued,
    Preflight,
    Proving,
    Ready,
    Error,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProofReceiptData {
    proof: Proof,
    /// Decoded outputs of the proved call: (owner, balance).
    evm_call_result: (Address, U256),
}

#[derive(Debug, Deserialize)]
struct ProofReceipt {
    status: ReceiptStatus,
    #[serde(default)]
    data: Option<ProofReceiptData>,
    #[serde(default)]
    error: Option<String>,
}

/// The three-element result of a completed proving job.
#[derive(Clone, Debug)]
pub struct ProvingResult {
    pub proof: Proof,
    pub owner: Address,
    pub balance: U256,
}

pub struct ProverClient {
    http: reqwest::Client,
    url: String,
}

fn prove_params(call: &ProveCall) -> Value {
    json!([
        {
            "to": call.address,
            "data": format!("0x{}", hex::encode(&call.calldata)),
            "gas_limit": call.gas_limit,
        },
        { "chain_id": call.chain_id },
    ])
}

impl ProverClient {
    /// Build a client for the given prover endpoint, attaching the API token
    /// as a bearer credential on every request.
    pub fn new(url: &str, token: &str) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::Decode {
                endpoint: url.to_string(),
                reason: "API token contains invalid header characters".to_string(),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|source| ClientError::Http {
                endpoint: url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a proving job; returns the handle to poll.
    pub async fn prove(&self, call: &ProveCall) -> Result<ProofHash, ClientError> {
        debug!(prover = %call.address, chain_id = call.chain_id, "submitting proving job");
        let result = rpc::call(&self.http, &self.url, "v_call", prove_params(call)).await?;
        serde_json::from_value(result).map_err(|e| ClientError::Decode {
            endpoint: format!("{} v_call", self.url),
            reason: e.to_string(),
        })
    }

    async fn get_proof_receipt(&self, hash: &ProofHash) -> Result<ProofReceipt, ClientError> {
        let result = rpc::call(
            &self.http,
            &self.url,
            "v_getProofReceipt",
            json!({ "hash": hash.0 }),
        )
        .await?;
        serde_json::from_value(result).map_err(|e| ClientError::Decode {
            endpoint: format!("{} v_getProofReceipt", self.url),
            reason: e.to_string(),
        })
    }

    /// Block until the proving job completes, polling once per second.
    pub async fn wait_for_proving_result(
        &self,
        hash: &ProofHash,
    ) -> Result<ProvingResult, ClientError> {
        for attempt in 0..PROOF_POLL_ATTEMPTS {
            let receipt = self.get_proof_receipt(hash).await?;
            match receipt.status {
                ReceiptStatus::Ready => {
                    let data = receipt.data.ok_or_else(|| ClientError::Decode {
                        endpoint: format!("{} v_getProofReceipt", self.url),
                        reason: "ready receipt without proof data".to_string(),
                    })?;
                    let (owner, balance) = data.evm_call_result;
                    return Ok(ProvingResult {
                        proof: data.proof,
                        owner,
                        balance,
                    });
                }
                ReceiptStatus::Error => {
                    return Err(ClientError::Prover(
                        receipt
                            .error
                            .unwrap_or_else(|| "proving service reported failure".to_string()),
                    ));
                }
                status => {
                    debug!(hash = %hash.0, ?status, attempt, "proving job still running");
                    tokio::time::sleep(PROOF_POLL_INTERVAL).await;
                }
            }
        }
        Err(ClientError::ProverTimeout {
            attempts: PROOF_POLL_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prove_params_shape() {
        let call = ProveCall {
            address: "0x1670276ab1398f62848cf8d63c00061130ffb93f".parse().unwrap(),
            calldata: vec![0xde, 0xad],
            chain_id: 31337,
            gas_limit: 1_000_000,
        };
        let params = prove_params(&call);
        assert_eq!(
            params[0]["to"],
            json!("0x1670276ab1398f62848cf8d63c00061130ffb93f")
        );
        assert_eq!(params[0]["data"], json!("0xdead"));
        assert_eq!(params[0]["gas_limit"], json!(1_000_000));
        assert_eq!(params[1]["chain_id"], json!(31337));
    }

    #[test]
    fn receipt_status_decoding() {
        let pending: ProofReceipt = serde_json::from_value(json!({"status": "proving"})).unwrap();
        assert_eq!(pending.status, ReceiptStatus::Proving);
        assert!(pending.data.is_none());

        let failed: ProofReceipt =
            serde_json::from_value(json!({"status": "error", "error": "preflight revert"}))
                .unwrap();
        assert_eq!(failed.status, ReceiptStatus::Error);
        assert_eq!(failed.error.as_deref(), Some("preflight revert"));
    }

    #[test]
    fn ready_receipt_carries_decoded_outputs() {
        let receipt: ProofReceipt = serde_json::from_value(json!({
            "status": "ready",
            "data": {
                "proof": {
                    "seal": {
                        "verifierSelector": "0xdeafbeef",
                        "seal": vec![format!("0x{}", "11".repeat(32)); 8],
                        "mode": 0,
                    },
                    "callGuestId": format!("0x{}", "22".repeat(32)),
                    "length": "640",
                    "callAssumptions": {
                        "proverContractAddress": "0x1670276ab1398f62848cf8d63c00061130ffb93f",
                        "functionSelector": "0x01020304",
                        "settleChainId": "31337",
                        "settleBlockNumber": "0x2a",
                        "settleBlockHash": format!("0x{}", "33".repeat(32)),
                    },
                },
                "evmCallResult": ["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266", "1"],
            },
        }))
        .unwrap();

        let data = receipt.data.unwrap();
        assert_eq!(
            data.evm_call_result.0.to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(data.evm_call_result.1, U256::from(1));
        assert_eq!(
            data.proof.call_assumptions.settle_block_number,
            U256::from(42)
        );
    }
}
