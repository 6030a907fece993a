use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use vlayer_client::error::ClientError;

/// Handler-level failures.
///
/// The demo surfaces every failure as a 500 with a structured `{error}` body;
/// nothing is retried server-side.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The custodial wallet has not finished initializing. Retryable.
    #[error("Wallet not initialized yet")]
    NotReady,

    /// The proving service or chain rejected the request; message passed
    /// through verbatim.
    #[error("{0}")]
    Prover(String),
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        ApiError::Prover(e.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody { error: msg }),
        )
            .into_response()
    }
}
