//! Signature shapes carried alongside transactions
//!
//! Two signature layers exist: the rollup's own signature (a packed public
//! key plus a Schnorr-style signature over the transaction bytes) and an
//! optional outer Ethereum signature proving the account owner authorized
//! the operation. Only syntactic well-formedness is checked here;
//! cryptographic verification belongs to an external verifier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signature validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("malformed signature: {0}")]
    MalformedInput(String),
    #[error("unsupported signature scheme: {0}")]
    UnsupportedSignatureScheme(String),
}

/// Check that a payload is a non-empty, even-length hex string,
/// with an optional `0x` prefix
pub(crate) fn check_hex_payload(field: &str, payload: &str) -> Result<(), SignatureError> {
    let body = payload.strip_prefix("0x").unwrap_or(payload);
    if body.is_empty() {
        return Err(SignatureError::MalformedInput(format!(
            "{} must not be empty",
            field
        )));
    }
    if body.len() % 2 != 0 || hex::decode(body).is_err() {
        return Err(SignatureError::MalformedInput(format!(
            "{} is not valid hex",
            field
        )));
    }
    Ok(())
}

// =============================================================================
// Rollup Signature
// =============================================================================

/// The rollup-level signature over a transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Packed public key of the signer, hex encoded
    pub pub_key: String,
    /// Signature bytes, hex encoded
    pub signature: String,
}

impl Signature {
    /// Syntactic well-formedness: both fields are non-empty hex
    pub fn validate(&self) -> Result<(), SignatureError> {
        check_hex_payload("signature.pubKey", &self.pub_key)?;
        check_hex_payload("signature.signature", &self.signature)?;
        Ok(())
    }
}

// =============================================================================
// Ethereum Signature
// =============================================================================

/// Recognized Ethereum signature verification schemes. A closed set:
/// any other tag fails with [`SignatureError::UnsupportedSignatureScheme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EthSignatureScheme {
    /// Plain ECDSA signature from an externally-owned account
    EthereumSignature,
    /// Contract-based signature verified via EIP-1271
    Eip1271Signature,
}

impl EthSignatureScheme {
    /// Wire tag of this scheme
    pub fn as_str(&self) -> &'static str {
        match self {
            EthSignatureScheme::EthereumSignature => "EthereumSignature",
            EthSignatureScheme::Eip1271Signature => "EIP1271Signature",
        }
    }
}

impl std::str::FromStr for EthSignatureScheme {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EthereumSignature" => Ok(EthSignatureScheme::EthereumSignature),
            "EIP1271Signature" => Ok(EthSignatureScheme::Eip1271Signature),
            other => Err(SignatureError::UnsupportedSignatureScheme(other.to_string())),
        }
    }
}

impl std::fmt::Display for EthSignatureScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for EthSignatureScheme {
    type Error = SignatureError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EthSignatureScheme> for String {
    fn from(scheme: EthSignatureScheme) -> Self {
        scheme.as_str().to_string()
    }
}

/// An Ethereum-level signature over the transaction, tagged with its scheme
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxEthSignature {
    #[serde(rename = "type")]
    pub scheme: EthSignatureScheme,
    /// Signature payload, `0x`-prefixed hex
    pub signature: String,
}

impl TxEthSignature {
    /// Syntactic well-formedness of the payload
    pub fn validate(&self) -> Result<(), SignatureError> {
        check_hex_payload("ethereumSignature.signature", &self.signature)
    }
}

/// How an external signer produces Ethereum signatures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthSignerType {
    /// Verification scheme the signer's signatures satisfy
    pub verification_method: VerificationMethod,
    /// Whether the signer already prepends the
    /// `\x19Ethereum Signed Message:\n` prefix before signing
    pub is_signed_msg_prefixed: bool,
}

/// Verification method tag for [`EthSignerType`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationMethod {
    #[serde(rename = "ECDSA")]
    Ecdsa,
    #[serde(rename = "ERC-1271")]
    Erc1271,
}
