use crate::contracts::ContractRegistry;
use crate::errors::ApiError;
use std::sync::Arc;
use tokio::sync::OnceCell;
use vlayer_client::client::ProverClient;
use vlayer_client::config::Config;
use vlayer_client::error::{ClientError, ConfigError};
use vlayer_client::types::Address;
use vlayer_client::wallet::Wallet;

/// Shared, read-only request context.
///
/// Built once in `main` and injected into every handler. The wallet lives in
/// a write-once cell: `main` fills it before serving, and a handler that
/// somehow runs first sees a clean `NotReady` instead of racing a global.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub contracts: ContractRegistry,
    prover: Arc<ProverClient>,
    wallet: Arc<OnceCell<Wallet>>,
}

impl AppState {
    /// Build the shared state, including the one prover client every request
    /// reuses (connection pool and auth header live for the process).
    pub fn new(config: Config, contracts: ContractRegistry) -> Result<Self, ClientError> {
        let prover = ProverClient::new(&config.prover_url, &config.token)?;
        Ok(Self {
            config: Arc::new(config),
            contracts,
            prover: Arc::new(prover),
            wallet: Arc::new(OnceCell::new()),
        })
    }

    /// Derive the custodial wallet from configuration and store it.
    ///
    /// Fails with `ConfigError` if no usable signing credential is set; that
    /// is fatal at startup, the server must not begin serving without it.
    pub fn init_wallet(&self) -> Result<Address, ConfigError> {
        let wallet = Wallet::from_config(&self.config)?;
        let address = wallet.address;
        // A second call is a no-op; the identity is immutable once set.
        let _ = self.wallet.set(wallet);
        Ok(address)
    }

    pub fn wallet(&self) -> Result<&Wallet, ApiError> {
        self.wallet.get().ok_or(ApiError::NotReady)
    }

    pub fn prover_client(&self) -> &ProverClient {
        &self.prover
    }
}
