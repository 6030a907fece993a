//! Client layer for the NFT balance proof demo.
//!
//! This crate contains:
//! - Configuration loaded from the environment (prover URL, chain, wallet key).
//! - A JSON-RPC client for the external vlayer-style proving service.
//! - A minimal chain RPC client (deploy, estimate gas, submit, poll receipts).
//! - Static ABI encoding for the two calls the demo's wire contract fixes.
//! - Transport-safe numeric types (256-bit integers serialize as decimal strings).

pub mod abi;
pub mod artifact;
pub mod chain;
pub mod client;
pub mod config;
pub mod error;
mod rpc;
pub mod types;
pub mod wallet;
