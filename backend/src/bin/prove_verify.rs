//! One-shot deploy→prove→verify pipeline.
//!
//! Linear flow with no recovery: deploy the NFT contract, deploy the prover
//! and verifier, request a balance proof for the wallet's own address, then
//! submit the claim to the on-chain verifier and wait for the receipt. Any
//! failure aborts the run; re-running redeploys fresh contracts.

use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vlayer_client::abi;
use vlayer_client::artifact::ContractArtifact;
use vlayer_client::chain::{EthClient, TransactionRequest};
use vlayer_client::client::{ProveCall, ProverClient};
use vlayer_client::config::Config;
use vlayer_client::types::Address;
use vlayer_client::wallet::Wallet;

/// The pre-existing Age Verification NFT the prover inspects.
const AGE_VERIFICATION_NFT: &str = "0xd542B1ab9DD7065CC66ded19CE3dA42d41d8B15C";

async fn deploy(
    eth: &EthClient,
    from: Address,
    artifacts_dir: &Path,
    name: &str,
    constructor_args: &[u8],
    confirmations: u64,
) -> Result<Address, Box<dyn std::error::Error>> {
    let path = artifacts_dir.join(format!("{name}.sol/{name}.json"));
    let artifact = ContractArtifact::load(&path)?;
    let tx_hash = eth
        .deploy_contract(from, &artifact.init_code(constructor_args)?)
        .await?;
    let address = eth.wait_for_contract_deploy(&tx_hash, confirmations).await?;
    info!(contract = name, %address, "deployed");
    Ok(address)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let config = Config::from_env()?;
    let wallet = Wallet::from_config(&config)?;
    let artifacts_dir = PathBuf::from(
        std::env::var("ARTIFACTS_DIR").unwrap_or_else(|_| "out".to_string()),
    );

    let age_nft: Address = AGE_VERIFICATION_NFT.parse().expect("hardcoded address");
    let eth = EthClient::new(&config.rpc_url)?;

    // 1. Fresh NFT contract.
    let nft_address = deploy(
        &eth,
        wallet.address,
        &artifacts_dir,
        "ExampleNFT",
        &[],
        config.confirmations,
    )
    .await?;

    // 2. Prover (reads the existing age NFT) and verifier (bound to the fresh NFT).
    let prover_address = deploy(
        &eth,
        wallet.address,
        &artifacts_dir,
        "SimpleProver",
        &abi::encode_constructor_address(&age_nft),
        config.confirmations,
    )
    .await?;
    let verifier_address = deploy(
        &eth,
        wallet.address,
        &artifacts_dir,
        "SimpleVerifier",
        &abi::encode_constructor_address(&nft_address),
        config.confirmations,
    )
    .await?;

    // 3. Prove the wallet's own NFT balance.
    info!(subject = %wallet.address, "proving");
    let prover = ProverClient::new(&config.prover_url, &config.token)?;
    let hash = prover
        .prove(&ProveCall {
            address: prover_address,
            calldata: abi::encode_balance_call(&wallet.address),
            chain_id: config.chain_id,
            gas_limit: config.gas_limit,
        })
        .await?;
    let result = prover.wait_for_proving_result(&hash).await?;
    info!(owner = %result.owner, balance = %result.balance, "proof received");

    // 4. Estimate against the pending block; `latest` under-prices claims
    // whose assumptions reference a not-yet-mined block on slower chains.
    let calldata = abi::encode_claim_whale_call(&result.proof, &result.owner, &result.balance);
    let claim = TransactionRequest::call(wallet.address, verifier_address, &calldata);
    let gas = eth.estimate_gas(&claim).await?;
    info!(gas, "gas estimated");

    // 5. Submit the claim with the estimated gas.
    let tx_hash = eth.send_transaction(&claim.with_gas(gas)).await?;

    // 6. Bounded receipt wait (60 × 1000ms).
    let receipt = eth
        .wait_for_transaction_receipt(&tx_hash, config.confirmations)
        .await?;
    info!(
        status = receipt.status.unwrap_or(0),
        succeeded = receipt.succeeded(),
        "verification result"
    );

    Ok(())
}
