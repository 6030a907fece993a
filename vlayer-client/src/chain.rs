//! Minimal chain JSON-RPC client for the deploy→prove→verify pipeline.
//!
//! Covers exactly what the pipeline needs: send a transaction (the demo node
//! holds the account unlocked and signs it), deploy contracts, estimate gas,
//! and poll for receipts. Not a general-purpose Ethereum client.

use crate::error::ClientError;
use crate::rpc;
use crate::types::{Address, B256};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Receipt polling window: 60 attempts, 1000ms apart.
const RECEIPT_RETRY_COUNT: u32 = 60;
const RECEIPT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Parse an Ethereum JSON-RPC hex quantity (`"0x1b4"`) into a u64.
pub fn parse_quantity(s: &str) -> Result<u64, String> {
    let raw = s
        .strip_prefix("0x")
        .ok_or_else(|| format!("quantity missing 0x prefix: {s}"))?;
    u64::from_str_radix(raw, 16).map_err(|e| format!("invalid quantity {s}: {e}"))
}

fn quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_quantity(&s).map_err(de::Error::custom)
}

fn opt_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| parse_quantity(&s).map_err(de::Error::custom))
        .transpose()
}

/// A transaction for the node to sign and submit.
///
/// `to: None` means contract creation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
}

impl TransactionRequest {
    pub fn call(from: Address, to: Address, calldata: &[u8]) -> Self {
        Self {
            from,
            to: Some(to),
            data: format!("0x{}", hex::encode(calldata)),
            gas: None,
        }
    }

    pub fn deploy(from: Address, init_code: &[u8]) -> Self {
        Self {
            from,
            to: None,
            data: format!("0x{}", hex::encode(init_code)),
            gas: None,
        }
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(format!("0x{gas:x}"));
        self
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// 1 on success, 0 on revert (post-Byzantium).
    #[serde(default, deserialize_with = "opt_quantity")]
    pub status: Option<u64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(deserialize_with = "quantity")]
    pub block_number: u64,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status == Some(1)
    }
}

/// Whether a receipt mined at `mined_block` has `required` confirmations at `head`.
///
/// The mined block itself counts as the first confirmation.
fn confirmations_reached(head: u64, mined_block: u64, required: u64) -> bool {
    head >= mined_block && head - mined_block + 1 >= required
}

pub struct EthClient {
    http: reqwest::Client,
    url: String,
}

impl EthClient {
    pub fn new(rpc_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| ClientError::Http {
                endpoint: rpc_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            url: rpc_url.trim_end_matches('/').to_string(),
        })
    }

    async fn call_str(&self, method: &str, params: serde_json::Value) -> Result<String, ClientError> {
        let result = rpc::call(&self.http, &self.url, method, params).await?;
        serde_json::from_value(result).map_err(|e| ClientError::Decode {
            endpoint: format!("{} {method}", self.url),
            reason: e.to_string(),
        })
    }

    pub async fn block_number(&self) -> Result<u64, ClientError> {
        let hex = self.call_str("eth_blockNumber", json!([])).await?;
        parse_quantity(&hex).map_err(|reason| ClientError::Decode {
            endpoint: format!("{} eth_blockNumber", self.url),
            reason,
        })
    }

    /// Estimate gas against the PENDING block.
    ///
    /// Estimating against `latest` under-prices a transaction whose on-chain
    /// preconditions assume a not-yet-mined block, which slower chains reject.
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ClientError> {
        let hex = self
            .call_str("eth_estimateGas", json!([tx, "pending"]))
            .await?;
        parse_quantity(&hex).map_err(|reason| ClientError::Chain {
            operation: "estimate_gas".to_string(),
            reason,
        })
    }

    /// Submit a transaction for the node-held account; returns the tx hash.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ClientError> {
        let hash = self.call_str("eth_sendTransaction", json!([tx])).await?;
        debug!(%hash, "transaction submitted");
        hash.parse().map_err(|reason| ClientError::Decode {
            endpoint: format!("{} eth_sendTransaction", self.url),
            reason,
        })
    }

    pub async fn get_transaction_receipt(
        &self,
        tx_hash: &B256,
    ) -> Result<Option<TransactionReceipt>, ClientError> {
        let result = rpc::call(
            &self.http,
            &self.url,
            "eth_getTransactionReceipt",
            json!([tx_hash.to_string()]),
        )
        .await?;
        if result.is_null() {
            return Ok(None);
        }
        serde_json::from_value(result)
            .map(Some)
            .map_err(|e| ClientError::Decode {
                endpoint: format!("{} eth_getTransactionReceipt", self.url),
                reason: e.to_string(),
            })
    }

    /// Poll until the receipt exists with the required confirmation depth.
    ///
    /// Exactly `RECEIPT_RETRY_COUNT` attempts; fails deterministically with
    /// `ReceiptTimeout` afterwards.
    pub async fn wait_for_transaction_receipt(
        &self,
        tx_hash: &B256,
        confirmations: u64,
    ) -> Result<TransactionReceipt, ClientError> {
        for attempt in 0..RECEIPT_RETRY_COUNT {
            if let Some(receipt) = self.get_transaction_receipt(tx_hash).await? {
                let head = self.block_number().await?;
                if confirmations_reached(head, receipt.block_number, confirmations) {
                    return Ok(receipt);
                }
                debug!(%tx_hash, head, mined = receipt.block_number, "awaiting confirmations");
            } else {
                debug!(%tx_hash, attempt, "receipt not yet available");
            }
            tokio::time::sleep(RECEIPT_RETRY_DELAY).await;
        }
        Err(ClientError::ReceiptTimeout {
            tx_hash: tx_hash.to_string(),
            attempts: RECEIPT_RETRY_COUNT,
        })
    }

    /// Deploy a contract (init code = bytecode ++ encoded constructor args).
    pub async fn deploy_contract(
        &self,
        from: Address,
        init_code: &[u8],
    ) -> Result<B256, ClientError> {
        self.send_transaction(&TransactionRequest::deploy(from, init_code))
            .await
    }

    /// Wait for a deployment to confirm and return the new contract address.
    pub async fn wait_for_contract_deploy(
        &self,
        tx_hash: &B256,
        confirmations: u64,
    ) -> Result<Address, ClientError> {
        let receipt = self
            .wait_for_transaction_receipt(tx_hash, confirmations)
            .await?;
        if !receipt.succeeded() {
            return Err(ClientError::Chain {
                operation: "deploy".to_string(),
                reason: format!("deployment transaction {tx_hash} reverted"),
            });
        }
        receipt.contract_address.ok_or_else(|| ClientError::Chain {
            operation: "deploy".to_string(),
            reason: format!("receipt for {tx_hash} carries no contract address"),
        })
    }
}
