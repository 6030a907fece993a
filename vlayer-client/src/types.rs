//! Wire types shared between the proving service, the chain client, and the API.
//!
//! Everything here is JSON-first: 256-bit integers travel as decimal strings
//! because text-based JSON cannot represent them losslessly as numbers, and
//! fixed-size byte values travel as `0x`-prefixed hex.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A 20-byte EVM address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| format!("invalid address hex: {e}"))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| "address must be exactly 20 bytes".to_string())?;
        Ok(Address(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A fixed 32-byte value (block hashes, seal words, guest ids).
///
/// Serialized as `0x`-prefixed hex. Not an integer: no arithmetic, no decimal form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct B256(pub [u8; 32]);

impl B256 {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for B256 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| format!("invalid hex: {e}"))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| "value must be exactly 32 bytes".to_string())?;
        Ok(B256(bytes))
    }
}

impl Serialize for B256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for B256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A 4-byte function selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Selector(pub [u8; 4]);

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| format!("invalid hex: {e}"))?;
        let bytes: [u8; 4] = bytes
            .try_into()
            .map_err(|_| "selector must be exactly 4 bytes".to_string())?;
        Ok(Selector(bytes))
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A 256-bit unsigned integer, stored as four little-endian u64 limbs.
///
/// JSON representation is ALWAYS a decimal string: JavaScript consumers parse
/// JSON numbers as f64 and silently lose precision past 2^53, so no value of
/// this type may ever be emitted as a numeric literal. Deserialization accepts
/// decimal strings, `0x` hex strings, and small JSON numbers (what Ethereum
/// JSON-RPC and the prover actually send).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct U256(pub [u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0u64; 4]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u64; 4]
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, limb) in self.0.iter().rev().enumerate() {
            out[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            limbs[3 - i] = u64::from_be_bytes(chunk);
        }
        U256(limbs)
    }

    /// Parse a `0x`-prefixed hex quantity (up to 32 bytes, leading zeros optional).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let raw = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        if raw.is_empty() || raw.len() > 64 {
            return Err(format!("hex quantity out of range: {s}"));
        }
        let padded = format!("{raw:0>64}");
        let bytes = hex::decode(&padded).map_err(|e| format!("invalid hex quantity: {e}"))?;
        let bytes: [u8; 32] = bytes.try_into().expect("padded to 64 nibbles");
        Ok(U256::from_be_bytes(bytes))
    }

    /// In-place multiply by a small factor, then add a small addend.
    ///
    /// Returns an error on overflow past 2^256.
    fn mul_add_small(&mut self, factor: u64, addend: u64) -> Result<(), String> {
        let mut carry = addend as u128;
        for limb in self.0.iter_mut() {
            let v = (*limb as u128) * (factor as u128) + carry;
            *limb = v as u64;
            carry = v >> 64;
        }
        if carry != 0 {
            return Err("value exceeds 256 bits".to_string());
        }
        Ok(())
    }

    /// In-place divide by a small divisor, returning the remainder.
    fn divmod_small(&mut self, divisor: u64) -> u64 {
        let mut rem = 0u128;
        for limb in self.0.iter_mut().rev() {
            let v = (rem << 64) | (*limb as u128);
            *limb = (v / divisor as u128) as u64;
            rem = v % divisor as u128;
        }
        rem as u64
    }
}

impl From<u64> for U256 {
    fn from(v: u64) -> Self {
        U256([v, 0, 0, 0])
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most significant limb first.
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut digits = Vec::new();
        let mut v = *self;
        while !v.is_zero() {
            digits.push(b'0' + v.divmod_small(10) as u8);
        }
        digits.reverse();
        f.write_str(std::str::from_utf8(&digits).expect("ascii digits"))
    }
}

impl FromStr for U256 {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            return U256::from_hex(s);
        }
        if s.is_empty() {
            return Err("empty decimal string".to_string());
        }
        let mut out = U256::ZERO;
        for c in s.bytes() {
            if !c.is_ascii_digit() {
                return Err(format!("invalid decimal digit in {s:?}"));
            }
            out.mul_add_small(10, (c - b'0') as u64)?;
        }
        Ok(out)
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string, a 0x-hex string, or an unsigned integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
        Ok(U256([v as u64, (v >> 64) as u64, 0, 0]))
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(U256Visitor)
    }
}

/// The contextual parameters under which a proof's computation is asserted valid.
///
/// Field order matches the on-chain struct; it is part of the ABI wire contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAssumptions {
    pub prover_contract_address: Address,
    pub function_selector: Selector,
    pub settle_chain_id: U256,
    pub settle_block_number: U256,
    pub settle_block_hash: B256,
}

/// The succinct cryptographic payload a verifier checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seal {
    pub verifier_selector: Selector,
    pub seal: [B256; 8],
    pub mode: u8,
}

/// A proof artifact returned by the proving service.
///
/// Opaque pass-through for this system: we never inspect the seal, only
/// re-encode it (ABI words for the claim transaction, JSON for clients).
/// Large numeric fields are `U256`, so the decimal-string conversion applies
/// to every nested field by construction rather than by a serializer override.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    pub seal: Seal,
    pub call_guest_id: B256,
    pub length: U256,
    pub call_assumptions: CallAssumptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u256_decimal_roundtrip() {
        for s in ["0", "1", "42", "18446744073709551615", "18446744073709551616"] {
            let v: U256 = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
        }
    }

    #[test]
    fn u256_two_pow_128() {
        // 2^128 does not fit in two limbs' worth of decimal digits a f64 can hold.
        let v: U256 = "340282366920938463463374607431768211456".parse().unwrap();
        assert_eq!(v.0, [0, 0, 1, 0]);
        assert_eq!(v.to_string(), "340282366920938463463374607431768211456");
    }

    #[test]
    fn u256_hex_parsing() {
        assert_eq!(U256::from_hex("0x0").unwrap(), U256::ZERO);
        assert_eq!(U256::from_hex("0x1").unwrap(), U256::from(1));
        // 10^18 in hex.
        assert_eq!(
            U256::from_hex("0x0de0b6b3a7640000").unwrap(),
            U256::from(1_000_000_000_000_000_000)
        );
    }

    #[test]
    fn u256_serializes_as_decimal_string() {
        let v = U256::from(u64::MAX);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json, serde_json::json!("18446744073709551615"));
        assert!(json.is_string(), "must never be a JSON number");
    }

    #[test]
    fn u256_deserializes_from_number_and_string() {
        let from_num: U256 = serde_json::from_str("7").unwrap();
        let from_str: U256 = serde_json::from_str("\"7\"").unwrap();
        let from_hex: U256 = serde_json::from_str("\"0x7\"").unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(from_num, from_hex);
    }

    #[test]
    fn u256_ordering_uses_high_limbs() {
        let small = U256([u64::MAX, 0, 0, 0]);
        let big = U256([0, 1, 0, 0]);
        assert!(small < big);
        assert!(U256::from(1) > U256::ZERO);
    }

    #[test]
    fn u256_be_bytes_roundtrip() {
        let v: U256 = "340282366920938463463374607431768211457".parse().unwrap();
        assert_eq!(U256::from_be_bytes(v.to_be_bytes()), v);
    }

    #[test]
    fn u256_rejects_overflow_and_garbage() {
        // 2^256 has 78 digits; this is 2^256 exactly.
        let two_pow_256 =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(two_pow_256.parse::<U256>().is_err());
        assert!("12a".parse::<U256>().is_err());
        assert!("".parse::<U256>().is_err());
    }

    #[test]
    fn address_parse_and_display() {
        let s = "0xd542b1ab9dd7065cc66ded19ce3da42d41d8b15c";
        let a: Address = s.parse().unwrap();
        assert_eq!(a.to_string(), s);
        // Prefix optional, case insensitive hex.
        let b: Address = "D542B1AB9DD7065CC66DED19CE3DA42D41D8B15C".parse().unwrap();
        assert_eq!(a, b);
        assert!("0x1234".parse::<Address>().is_err());
    }

    #[test]
    fn proof_json_uses_camel_case_and_string_numbers() {
        let proof = Proof {
            seal: Seal {
                verifier_selector: Selector([0xde, 0xad, 0xbe, 0xef]),
                seal: [B256([7u8; 32]); 8],
                mode: 1,
            },
            call_guest_id: B256([1u8; 32]),
            length: U256::from(640),
            call_assumptions: CallAssumptions {
                prover_contract_address: Address([2u8; 20]),
                function_selector: Selector([0x01, 0x02, 0x03, 0x04]),
                settle_chain_id: U256::from(11155111),
                settle_block_number: U256::from(123456),
                settle_block_hash: B256([3u8; 32]),
            },
        };

        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["length"], serde_json::json!("640"));
        assert_eq!(
            json["callAssumptions"]["settleBlockNumber"],
            serde_json::json!("123456")
        );
        assert_eq!(json["seal"]["verifierSelector"], serde_json::json!("0xdeadbeef"));

        let back: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(back.length, proof.length);
        assert_eq!(
            back.call_assumptions.prover_contract_address,
            proof.call_assumptions.prover_contract_address
        );
    }
}
