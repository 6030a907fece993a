//! Error types for the prover and chain clients.

/// Errors from environment configuration.
///
/// Any of these is fatal at startup: the server must not begin serving
/// without a complete configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0} (make sure it is set before starting)")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Errors from the proving service and the chain RPC node.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport failure (connect, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The remote endpoint returned a JSON-RPC error object.
    ///
    /// Surfaced verbatim so prover rejections reach the caller unchanged.
    #[error("{endpoint} returned JSON-RPC error {code}: {message}")]
    Rpc {
        endpoint: String,
        code: i64,
        message: String,
    },

    /// A response arrived but could not be decoded into the expected shape.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// The proving service reported a failed or rejected job.
    #[error("proving failed: {0}")]
    Prover(String),

    /// The proving job did not complete within the polling window.
    #[error("timed out waiting for proving result after {attempts} attempts")]
    ProverTimeout { attempts: u32 },

    /// Deployment, gas estimation, or submission failure.
    #[error("chain error during {operation}: {reason}")]
    Chain { operation: String, reason: String },

    /// The transaction receipt did not reach the required confirmation depth.
    #[error("timed out waiting for receipt of {tx_hash} after {attempts} attempts")]
    ReceiptTimeout { tx_hash: String, attempts: u32 },
}
