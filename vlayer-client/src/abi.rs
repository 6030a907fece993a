//! Static ABI encoding for the demo's fixed wire contract.
//!
//! Only two calls exist: the prover's `balance(address)` and the verifier's
//! `claimWhale(Proof, address, uint256)`. The Proof struct is fully static
//! (fixed-size fields only), so encoding is a flat sequence of 32-byte head
//! words. Argument order and types are part of the on-chain ABI and must not
//! be changed.

use crate::types::{Address, Proof, U256};
use sha3::{Digest, Keccak256};

/// Canonical signature of the verifier's claim function.
///
/// Proof = ((bytes4, bytes32[8], uint8) seal, bytes32 callGuestId,
///          uint256 length, (address, bytes4, uint256, uint256, bytes32) assumptions).
const CLAIM_WHALE_SIGNATURE: &str = "claimWhale(((bytes4,bytes32[8],uint8),bytes32,uint256,(address,bytes4,uint256,uint256,bytes32)),address,uint256)";

const BALANCE_SIGNATURE: &str = "balance(address)";

/// First four bytes of the Keccak-256 of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

fn push_address(out: &mut Vec<u8>, address: &Address) {
    out.extend_from_slice(&[0u8; 12]);
    out.extend_from_slice(address.as_bytes());
}

fn push_u256(out: &mut Vec<u8>, value: &U256) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_bytes4(out: &mut Vec<u8>, value: &[u8; 4]) {
    out.extend_from_slice(value);
    out.extend_from_slice(&[0u8; 28]);
}

fn push_u8(out: &mut Vec<u8>, value: u8) {
    out.extend_from_slice(&[0u8; 31]);
    out.push(value);
}

/// Calldata for the prover call `balance(address)`.
pub fn encode_balance_call(subject: &Address) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 32);
    out.extend_from_slice(&selector(BALANCE_SIGNATURE));
    push_address(&mut out, subject);
    out
}

/// Calldata for the verifier call `claimWhale(proof, owner, balance)`.
pub fn encode_claim_whale_call(proof: &Proof, owner: &Address, balance: &U256) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 19 * 32);
    out.extend_from_slice(&selector(CLAIM_WHALE_SIGNATURE));

    push_bytes4(&mut out, &proof.seal.verifier_selector.0);
    for word in &proof.seal.seal {
        out.extend_from_slice(word.as_bytes());
    }
    push_u8(&mut out, proof.seal.mode);

    out.extend_from_slice(proof.call_guest_id.as_bytes());
    push_u256(&mut out, &proof.length);

    let assumptions = &proof.call_assumptions;
    push_address(&mut out, &assumptions.prover_contract_address);
    push_bytes4(&mut out, &assumptions.function_selector.0);
    push_u256(&mut out, &assumptions.settle_chain_id);
    push_u256(&mut out, &assumptions.settle_block_number);
    out.extend_from_slice(assumptions.settle_block_hash.as_bytes());

    push_address(&mut out, owner);
    push_u256(&mut out, balance);
    out
}

/// Constructor arguments for the demo contracts: a single address, appended
/// to the deployment bytecode as one head word.
pub fn encode_constructor_address(address: &Address) -> Vec<u8> {
    let mut out = Vec::with_capacity(32);
    push_address(&mut out, address);
    out
}
