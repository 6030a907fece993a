use crate::errors::ApiError;
use crate::models::*;
use crate::proof;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/verify-age", post(verify_age))
        .route("/demo-wallet", get(demo_wallet))
        .route("/nfc-proof", get(nfc_proof))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::new(state.contracts))
}

async fn verify_age(State(state): State<AppState>) -> Result<Json<VerifyAgeResponse>, ApiError> {
    let result = proof::request_proof(&state).await.map_err(|e| {
        tracing::error!(error = %e, "error generating proof");
        e
    })?;
    Ok(Json(VerifyAgeResponse::from_result(result, state.contracts)))
}

async fn demo_wallet(State(state): State<AppState>) -> Result<Json<DemoWalletResponse>, ApiError> {
    let wallet = state.wallet()?;
    Ok(Json(DemoWalletResponse::new(wallet.address, state.contracts)))
}

/// Privacy-redacted variant: same proving flow, but the response carries only
/// the seal, length, and call assumptions. See `models::RedactedProofData`.
async fn nfc_proof(State(state): State<AppState>) -> Result<Json<NfcProofResponse>, ApiError> {
    let result = proof::request_proof(&state).await.map_err(|e| {
        tracing::error!(error = %e, "error generating redacted proof");
        e
    })?;
    Ok(Json(NfcProofResponse::from_result(result, Utc::now())))
}
