mod api;
mod contracts;
mod errors;
mod models;
mod proof;
mod state;

use crate::state::AppState;
use tracing_subscriber::EnvFilter;
use vlayer_client::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // A missing credential or prover endpoint is fatal: do not serve.
    let config = Config::from_env()?;
    let contracts = contracts::demo_registry();
    let state = AppState::new(config, contracts)?;

    // The wallet is written exactly once, before any request is accepted.
    let wallet_address = state.init_wallet()?;
    tracing::info!(%wallet_address, "custodial wallet initialized for demo");
    tracing::info!(
        age_nft = %contracts.age_verification_nft,
        prover = %contracts.prover,
        verifier = %contracts.verifier,
        "using hardcoded contract addresses"
    );

    let app = api::router(state);

    let addr = std::env::var("BACKEND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "backend listening");

    axum::serve(listener, app).await?;

    Ok(())
}
