//! Proof orchestration: one prover call, one blocking wait.
//!
//! The only provable subject in this demo is the custodial wallet's own
//! address; no caller-supplied subject is accepted. No caching and no retry
//! policy beyond whatever the proving service does internally.

use crate::errors::ApiError;
use crate::state::AppState;
use tracing::info;
use vlayer_client::abi;
use vlayer_client::client::{ProveCall, ProvingResult};

pub async fn request_proof(state: &AppState) -> Result<ProvingResult, ApiError> {
    let wallet = state.wallet()?;
    let client = state.prover_client();

    info!(wallet = %wallet.address, "generating proof for custodial wallet");

    let call = ProveCall {
        address: state.contracts.prover,
        calldata: abi::encode_balance_call(&wallet.address),
        chain_id: state.config.chain_id,
        gas_limit: state.config.gas_limit,
    };

    let hash = client.prove(&call).await?;
    let result = client.wait_for_proving_result(&hash).await?;

    info!(owner = %result.owner, balance = %result.balance, "proving result received");
    Ok(result)
}
