//! # Core Ledger Entities
//!
//! Fixed-width identifiers shared by facts, operations and ledger state.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `PublicKey`
//! - **Integrity**: `Hash`, `Signature`
//! - **Time**: `Timestamp`, `NetworkId`

use crate::errors::FormatError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use std::str::FromStr;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

// =============================================================================
// INTEGRITY
// =============================================================================

/// A 32-byte SHA-256 digest.
///
/// The all-zero value is reserved as "no hash" and is never structurally valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The reserved empty hash.
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Checks well-formedness (not the reserved empty hash).
    pub fn is_valid(&self) -> Result<(), FormatError> {
        if self.0 == [0u8; 32] {
            return Err(FormatError::EmptyHash);
        }
        Ok(())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", hex::encode(&self.0[..8]))
    }
}

impl FromStr for Hash {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_fixed::<32>(s)?))
    }
}

/// A 64-byte Ed25519 signature.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] pub [u8; 64]);

impl Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}..)", hex::encode(&self.0[..8]))
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// A 20-byte account address.
///
/// The all-zero value is the null address and is never structurally valid.
/// The lowercase hex rendering is the address's canonical state-key encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The reserved null address.
    pub const NULL: Self = Self([0u8; 20]);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Checks well-formedness (not the null address).
    ///
    /// Existence on the ledger is a separate concern.
    pub fn is_valid(&self) -> Result<(), FormatError> {
        if self.0 == [0u8; 20] {
            return Err(FormatError::NullAddress);
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_fixed::<20>(s)?))
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}..)", hex::encode(&self.0[..8]))
    }
}

// =============================================================================
// NETWORK
// =============================================================================

/// Network identifier mixed into every signed message.
///
/// Signatures produced for one network never verify on another.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NetworkId(Vec<u8>);

impl NetworkId {
    pub fn new(id: impl Into<Vec<u8>>) -> Self {
        Self(id.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for NetworkId {
    fn from(id: &str) -> Self {
        Self(id.as_bytes().to_vec())
    }
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], FormatError> {
    let raw = hex::decode(s.trim_start_matches("0x"))
        .map_err(|e| FormatError::InvalidHex(e.to_string()))?;
    raw.try_into().map_err(|raw: Vec<u8>| FormatError::InvalidLength {
        expected: N,
        actual: raw.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_address_is_invalid() {
        assert_eq!(Address::NULL.is_valid(), Err(FormatError::NullAddress));
        assert!(Address([0xAA; 20]).is_valid().is_ok());
    }

    #[test]
    fn test_empty_hash_is_invalid() {
        assert_eq!(Hash::ZERO.is_valid(), Err(FormatError::EmptyHash));
        assert!(Hash([1; 32]).is_valid().is_ok());
    }

    #[test]
    fn test_address_hex_roundtrip() {
        let address = Address([0xAB; 20]);
        let rendered = address.to_string();
        assert_eq!(rendered.len(), 40);
        assert_eq!(rendered.parse::<Address>().unwrap(), address);
        assert_eq!(format!("0x{rendered}").parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_address_parse_wrong_length() {
        let err = "abcd".parse::<Address>().unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidLength {
                expected: 20,
                actual: 2
            }
        );
    }

    #[test]
    fn test_address_parse_bad_hex() {
        assert!(matches!(
            "zz".parse::<Address>(),
            Err(FormatError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_signature_serde_roundtrip() {
        let signature = Signature([7u8; 64]);
        let json = serde_json::to_string(&signature).unwrap();
        let decoded: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, signature);
    }
}
