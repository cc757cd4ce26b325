//! Account identifiers for the rollup network
//!
//! Two fixed-format hex identifiers appear on the wire:
//! - `Address`: a 20-byte Ethereum-style account address, `0x`-prefixed
//! - `PubKeyHash`: a 20-byte hash of the account's rollup signing key,
//!   `sync:`-prefixed so it can never be confused with an address
//!
//! Both are stored in canonical lowercase form, so parsing round-trips
//! to the identical string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Prefix for plain account addresses
pub const ADDRESS_PREFIX: &str = "0x";

/// Prefix for public key hashes
pub const PUBKEY_HASH_PREFIX: &str = "sync:";

/// Hex digits in either identifier (20 bytes)
pub const IDENTIFIER_HEX_LEN: usize = 40;

// =============================================================================
// Error Types
// =============================================================================

/// Identifier parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Validate the hex body shared by both identifier kinds
fn check_hex_body(kind: &str, body: &str) -> Result<(), ParseError> {
    if body.len() != IDENTIFIER_HEX_LEN {
        return Err(ParseError::MalformedInput(format!(
            "{} must contain {} hex digits, got {}",
            kind,
            IDENTIFIER_HEX_LEN,
            body.len()
        )));
    }
    if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::MalformedInput(format!(
            "{} contains non-hex characters",
            kind
        )));
    }
    Ok(())
}

// =============================================================================
// Address
// =============================================================================

/// A 20-byte account address in canonical lowercase hex form
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The zero address, implied for the native "ETH" token
    pub fn zero() -> Self {
        Self(format!("{}{}", ADDRESS_PREFIX, "0".repeat(IDENTIFIER_HEX_LEN)))
    }

    /// Whether this is the reserved zero address
    pub fn is_zero(&self) -> bool {
        self.0[ADDRESS_PREFIX.len()..].bytes().all(|b| b == b'0')
    }

    /// Canonical string form (`0x` + 40 lowercase hex digits)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw 20-byte value
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        // The constructor guarantees 40 hex digits
        if let Ok(decoded) = hex::decode(&self.0[ADDRESS_PREFIX.len()..]) {
            out.copy_from_slice(&decoded);
        }
        out
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix(ADDRESS_PREFIX).ok_or_else(|| {
            ParseError::MalformedInput(format!("address must start with '{}'", ADDRESS_PREFIX))
        })?;
        check_hex_body("address", body)?;
        Ok(Self(format!("{}{}", ADDRESS_PREFIX, body.to_lowercase())))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// PubKeyHash
// =============================================================================

/// Hash of a rollup signing key, in canonical lowercase `sync:` form
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PubKeyHash(String);

impl PubKeyHash {
    /// The all-zero hash, reported for accounts that never set a signing key
    pub fn zero() -> Self {
        Self(format!(
            "{}{}",
            PUBKEY_HASH_PREFIX,
            "0".repeat(IDENTIFIER_HEX_LEN)
        ))
    }

    /// Whether no signing key has been set
    pub fn is_zero(&self) -> bool {
        self.0[PUBKEY_HASH_PREFIX.len()..].bytes().all(|b| b == b'0')
    }

    /// Canonical string form (`sync:` + 40 lowercase hex digits)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PubKeyHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix(PUBKEY_HASH_PREFIX).ok_or_else(|| {
            ParseError::MalformedInput(format!(
                "public key hash must start with '{}'",
                PUBKEY_HASH_PREFIX
            ))
        })?;
        check_hex_body("public key hash", body)?;
        Ok(Self(format!("{}{}", PUBKEY_HASH_PREFIX, body.to_lowercase())))
    }
}

impl fmt::Display for PubKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PubKeyHash {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PubKeyHash> for String {
    fn from(hash: PubKeyHash) -> Self {
        hash.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_roundtrip() {
        let input = "0xde03a0B5963f75f1C8485B355fF6D30f3093BDE7";
        let addr: Address = input.parse().unwrap();
        // Canonical form is lowercase and parses back to itself
        assert_eq!(addr.to_string(), input.to_lowercase());
        let again: Address = addr.to_string().parse().unwrap();
        assert_eq!(addr, again);
    }

    #[test]
    fn test_address_rejects_bad_prefix() {
        let err = "de03a0b5963f75f1c8485b355ff6d30f3093bde7".parse::<Address>();
        assert!(matches!(err, Err(ParseError::MalformedInput(_))));
        let err = "sync:de03a0b5963f75f1c8485b355ff6d30f3093bde7".parse::<Address>();
        assert!(matches!(err, Err(ParseError::MalformedInput(_))));
    }

    #[test]
    fn test_address_rejects_bad_length() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0x".parse::<Address>().is_err());
        let too_long = format!("0x{}", "a".repeat(41));
        assert!(too_long.parse::<Address>().is_err());
    }

    #[test]
    fn test_address_rejects_non_hex() {
        let input = format!("0x{}", "g".repeat(40));
        assert!(input.parse::<Address>().is_err());
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.as_str(), format!("0x{}", "0".repeat(40)));
        assert_eq!(zero.to_bytes(), [0u8; 20]);
    }

    #[test]
    fn test_pubkey_hash_parse() {
        let input = format!("sync:{}", "ab".repeat(20));
        let hash: PubKeyHash = input.parse().unwrap();
        assert_eq!(hash.to_string(), input);
        assert!(!hash.is_zero());
        assert!(PubKeyHash::zero().is_zero());
    }

    #[test]
    fn test_pubkey_hash_rejects_address_prefix() {
        let input = format!("0x{}", "ab".repeat(20));
        assert!(input.parse::<PubKeyHash>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let addr: Address = format!("0x{}", "AB".repeat(20)).parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        // Malformed strings are rejected at the serde boundary too
        assert!(serde_json::from_str::<Address>("\"0x12\"").is_err());
    }
}
