use crate::contracts::ContractRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use vlayer_client::client::ProvingResult;
use vlayer_client::types::{Address, CallAssumptions, Proof, Seal, U256};

const DEMO_NOTE: &str = "This is a hackathon demo using a server-side custodial wallet. In production, proofs would be generated on-device.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub message: String,
    pub note: String,
    pub contracts: ContractRegistry,
}

impl StatusResponse {
    pub fn new(contracts: ContractRegistry) -> Self {
        Self {
            message: "Age Verification API is running".to_string(),
            note: DEMO_NOTE.to_string(),
            contracts,
        }
    }
}

/// Full view of a proving result: the whole proof plus the decoded outputs.
///
/// `nft_balance` is a `U256`, so it reaches the wire as a decimal string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAgeResponse {
    pub success: bool,
    pub demo_note: String,
    pub proof: Proof,
    pub owner: Address,
    pub nft_balance: U256,
    pub is_verified: bool,
    pub contracts: ContractRegistry,
}

impl VerifyAgeResponse {
    pub fn from_result(result: ProvingResult, contracts: ContractRegistry) -> Self {
        Self {
            success: true,
            demo_note: DEMO_NOTE.to_string(),
            is_verified: !result.balance.is_zero(),
            proof: result.proof,
            owner: result.owner,
            nft_balance: result.balance,
            contracts,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoWalletResponse {
    pub demo_note: String,
    pub wallet_address: Address,
    pub contracts: ContractRegistry,
}

impl DemoWalletResponse {
    pub fn new(wallet_address: Address, contracts: ContractRegistry) -> Self {
        Self {
            demo_note: "This endpoint only exists for the hackathon demo. In production, the wallet would be on the user's device.".to_string(),
            wallet_address,
            contracts,
        }
    }
}

/// The privacy contract of the redacted endpoint: seal, length, and call
/// assumptions only. The owner address and the raw balance MUST NOT appear.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedProofData {
    pub seal: Seal,
    pub length: U256,
    pub call_assumptions: CallAssumptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationProof {
    pub proof_data: RedactedProofData,
    pub is_verified: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcProofResponse {
    pub verification_proof: VerificationProof,
}

impl NfcProofResponse {
    pub fn from_result(result: ProvingResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            verification_proof: VerificationProof {
                proof_data: RedactedProofData {
                    seal: result.proof.seal,
                    length: result.proof.length,
                    call_assumptions: result.proof.call_assumptions,
                },
                is_verified: !result.balance.is_zero(),
                timestamp,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::demo_registry;
    use vlayer_client::types::{B256, Selector};

    fn proving_result(balance: u64) -> ProvingResult {
        ProvingResult {
            proof: Proof {
                seal: Seal {
                    verifier_selector: Selector([1, 2, 3, 4]),
                    seal: [B256([0xaa; 32]); 8],
                    mode: 0,
                },
                call_guest_id: B256([0xbb; 32]),
                length: U256::from(640),
                call_assumptions: CallAssumptions {
                    prover_contract_address: demo_registry().prover,
                    function_selector: Selector([5, 6, 7, 8]),
                    settle_chain_id: U256::from(31337),
                    settle_block_number: U256::from(99),
                    settle_block_hash: B256([0xcc; 32]),
                },
            },
            owner: "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap(),
            balance: U256::from(balance),
        }
    }

    #[test]
    fn is_verified_boundary() {
        let zero = VerifyAgeResponse::from_result(proving_result(0), demo_registry());
        assert!(!zero.is_verified);

        let one = VerifyAgeResponse::from_result(proving_result(1), demo_registry());
        assert!(one.is_verified);
    }

    #[test]
    fn balance_reaches_wire_as_string() {
        let resp = VerifyAgeResponse::from_result(proving_result(3), demo_registry());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["nftBalance"], serde_json::json!("3"));
        assert_eq!(json["isVerified"], serde_json::json!(true));
        assert_eq!(json["proof"]["length"], serde_json::json!("640"));
    }

    #[test]
    fn redacted_view_never_leaks_owner_or_balance() {
        let resp = NfcProofResponse::from_result(proving_result(5), Utc::now());
        let text = serde_json::to_string(&resp).unwrap();

        // The owner's address must not appear anywhere in the payload.
        assert!(!text.contains("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"));
        assert!(!text.contains("owner"));
        assert!(!text.contains("nftBalance"));
        assert!(!text.contains("balance"));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let proof_data = &json["verificationProof"]["proofData"];
        assert!(proof_data.get("seal").is_some());
        assert!(proof_data.get("length").is_some());
        let assumptions = &proof_data["callAssumptions"];
        for key in [
            "proverContractAddress",
            "functionSelector",
            "settleChainId",
            "settleBlockNumber",
            "settleBlockHash",
        ] {
            assert!(assumptions.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["verificationProof"]["isVerified"], serde_json::json!(true));
        assert!(json["verificationProof"].get("timestamp").is_some());
    }
}
