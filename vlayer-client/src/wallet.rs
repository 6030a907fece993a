//! The demo custodial wallet: a signing credential held server-side.
//!
//! Immutable once constructed; the address is derived from the configured
//! private key the standard EVM way (Keccak-256 of the uncompressed public
//! key, last 20 bytes). Nothing here signs transactions — the demo targets a
//! dev node that holds the same account unlocked, so signing stays node-side.

use crate::config::Config;
use crate::error::ConfigError;
use crate::types::Address;
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

#[derive(Clone, Debug)]
pub struct Wallet {
    pub address: Address,
}

impl Wallet {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::from_private_key(&config.private_key)
    }

    pub fn from_private_key(private_key: &str) -> Result<Self, ConfigError> {
        let raw = private_key.strip_prefix("0x").unwrap_or(private_key);
        let bytes = hex::decode(raw).map_err(|e| ConfigError::InvalidVar {
            var: "EXAMPLES_TEST_PRIVATE_KEY",
            reason: format!("invalid hex: {e}"),
        })?;

        let key = SigningKey::from_slice(&bytes).map_err(|e| ConfigError::InvalidVar {
            var: "EXAMPLES_TEST_PRIVATE_KEY",
            reason: format!("not a valid secp256k1 key: {e}"),
        })?;

        let public = key.verifying_key().to_encoded_point(false);
        // Skip the 0x04 uncompressed-point tag.
        let digest = Keccak256::digest(&public.as_bytes()[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&digest[12..]);
        Ok(Self {
            address: Address(address),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_dev_node_account_zero() {
        // Well-known anvil/hardhat dev account #0.
        let wallet = Wallet::from_private_key(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        assert_eq!(
            wallet.address.to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn rejects_garbage_keys() {
        assert!(Wallet::from_private_key("not hex").is_err());
        assert!(Wallet::from_private_key("0x1234").is_err());
        // Zero is not a valid scalar.
        assert!(Wallet::from_private_key(&"00".repeat(32)).is_err());
    }
}
