//! The fixed contract registry for the demo deployment.
//!
//! Static addresses, loaded once and never mutated at runtime. The JSON keys
//! are part of the client-facing wire contract.

use serde::Serialize;
use vlayer_client::types::Address;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ContractRegistry {
    #[serde(rename = "AGE_VERIFICATION_NFT")]
    pub age_verification_nft: Address,
    #[serde(rename = "PROVER")]
    pub prover: Address,
    #[serde(rename = "VERIFIER")]
    pub verifier: Address,
}

pub fn demo_registry() -> ContractRegistry {
    ContractRegistry {
        age_verification_nft: "0xd542B1ab9DD7065CC66ded19CE3dA42d41d8B15C"
            .parse()
            .expect("hardcoded address"),
        prover: "0x1670276ab1398f62848cf8d63c00061130ffb93f"
            .parse()
            .expect("hardcoded address"),
        verifier: "0xadc19d3b918f76259f631353614a81f390173b16"
            .parse()
            .expect("hardcoded address"),
    }
}
