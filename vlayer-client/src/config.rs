//! Environment configuration for both the server and the pipeline binary.

use crate::error::ConfigError;

/// Everything the demo reads from the environment.
///
/// All fields are required; the process refuses to start without them.
#[derive(Clone, Debug)]
pub struct Config {
    /// Hex-encoded secp256k1 private key for the demo custodial wallet.
    pub private_key: String,
    /// Base URL of the proving service JSON-RPC endpoint.
    pub prover_url: String,
    /// Bearer token for the proving service.
    pub token: String,
    /// URL of the chain JSON-RPC node.
    pub rpc_url: String,
    /// Chain the proof settles on.
    pub chain_id: u64,
    /// Gas limit passed to the proving service for the prover call.
    pub gas_limit: u64,
    /// Confirmations required before a receipt counts as final.
    pub confirmations: u64,
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn require_u64(var: &'static str) -> Result<u64, ConfigError> {
    require(var)?.parse().map_err(|e| ConfigError::InvalidVar {
        var,
        reason: format!("expected an unsigned integer: {e}"),
    })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            private_key: require("EXAMPLES_TEST_PRIVATE_KEY")?,
            prover_url: require("PROVER_URL")?,
            token: require("VLAYER_API_TOKEN")?,
            rpc_url: require("JSON_RPC_URL")?,
            chain_id: require_u64("CHAIN_ID")?,
            gas_limit: require_u64("GAS_LIMIT")?,
            confirmations: require_u64("CONFIRMATIONS")?,
        })
    }
}
