//! Rollup transaction variants
//!
//! Four operations can be submitted to the network, discriminated on the
//! wire by their `type` tag: `Transfer`, `Withdraw`, `ChangePubKey` and
//! `Close`. The tag set is closed; anything else is a parse error rather
//! than a best-effort coercion.
//!
//! Validation here is structural: required fields, numeric formats and
//! signature syntax. Nothing in this module touches a key or verifies a
//! signature cryptographically.

use crate::core::address::{Address, ParseError, PubKeyHash};
use crate::core::amount::TokenAmount;
use crate::core::signature::{check_hex_payload, Signature, SignatureError, TxEthSignature};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Transaction validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("{0}")]
    MalformedInput(#[from] ParseError),
    #[error("{0}")]
    SignatureError(#[from] SignatureError),
}

// =============================================================================
// Nonce
// =============================================================================

/// Wire sentinel for [`Nonce::Committed`]
const NONCE_COMMITTED: &str = "committed";

/// A transaction nonce: either an explicit sequence number or the
/// `"committed"` sentinel meaning "use the account's latest committed nonce"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nonce {
    Number(u32),
    Committed,
}

impl Serialize for Nonce {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nonce::Number(n) => serializer.serialize_u32(*n),
            Nonce::Committed => serializer.serialize_str(NONCE_COMMITTED),
        }
    }
}

struct NonceVisitor;

impl<'de> Visitor<'de> for NonceVisitor {
    type Value = Nonce;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "a non-negative integer or the string \"{}\"",
            NONCE_COMMITTED
        )
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(Nonce::Number)
            .map_err(|_| E::custom("nonce out of range"))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u32::try_from(value)
            .map(Nonce::Number)
            .map_err(|_| E::custom("nonce must be non-negative"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value == NONCE_COMMITTED {
            Ok(Nonce::Committed)
        } else {
            Err(E::custom(format!(
                "unknown nonce sentinel '{}', expected \"{}\"",
                value, NONCE_COMMITTED
            )))
        }
    }
}

impl<'de> Deserialize<'de> for Nonce {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NonceVisitor)
    }
}

// =============================================================================
// Transaction Variants
// =============================================================================

/// Move funds between two rollup accounts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub account_id: u32,
    pub from: Address,
    pub to: Address,
    /// Numeric id of the token being transferred
    pub token: u16,
    pub amount: TokenAmount,
    pub fee: TokenAmount,
    pub nonce: Nonce,
    pub signature: Signature,
}

/// Move funds from a rollup account to a layer-1 address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    pub account_id: u32,
    pub from: Address,
    /// Layer-1 address receiving the withdrawn funds
    pub to: Address,
    pub token: u16,
    pub amount: TokenAmount,
    pub fee: TokenAmount,
    pub nonce: Nonce,
    pub signature: Signature,
}

/// Register a new rollup signing key for an account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePubKey {
    pub account_id: u32,
    pub account: Address,
    pub new_pk_hash: PubKeyHash,
    pub nonce: Nonce,
    /// Ethereum signature authorizing the key change, `0x`-prefixed hex
    pub eth_signature: String,
}

/// Close an empty account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseAccount {
    pub account: Address,
    pub nonce: Nonce,
    pub signature: Signature,
}

/// Any rollup transaction, discriminated by its wire `type` tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Transaction {
    Transfer(Transfer),
    Withdraw(Withdraw),
    ChangePubKey(ChangePubKey),
    #[serde(rename = "Close")]
    CloseAccount(CloseAccount),
}

impl Transaction {
    /// Wire tag of this variant
    pub fn type_tag(&self) -> &'static str {
        match self {
            Transaction::Transfer(_) => "Transfer",
            Transaction::Withdraw(_) => "Withdraw",
            Transaction::ChangePubKey(_) => "ChangePubKey",
            Transaction::CloseAccount(_) => "Close",
        }
    }

    /// The nonce the transaction was built with
    pub fn nonce(&self) -> Nonce {
        match self {
            Transaction::Transfer(tx) => tx.nonce,
            Transaction::Withdraw(tx) => tx.nonce,
            Transaction::ChangePubKey(tx) => tx.nonce,
            Transaction::CloseAccount(tx) => tx.nonce,
        }
    }

    /// Structural validation of the variant's fields
    ///
    /// Field formats enforced by the types themselves (addresses, amounts,
    /// nonces) are already guaranteed at the parse boundary; this checks the
    /// parts the type system leaves open, naming the offending field.
    pub fn validate(&self) -> Result<(), TransactionError> {
        match self {
            Transaction::Transfer(tx) => tx
                .signature
                .validate()
                .map_err(|e| TransactionError::InvalidTransaction(format!("Transfer: {}", e))),
            Transaction::Withdraw(tx) => tx
                .signature
                .validate()
                .map_err(|e| TransactionError::InvalidTransaction(format!("Withdraw: {}", e))),
            Transaction::ChangePubKey(tx) => check_hex_payload("ethSignature", &tx.eth_signature)
                .map_err(|e| {
                    TransactionError::InvalidTransaction(format!("ChangePubKey: {}", e))
                }),
            Transaction::CloseAccount(tx) => tx
                .signature
                .validate()
                .map_err(|e| TransactionError::InvalidTransaction(format!("Close: {}", e))),
        }
    }
}

// =============================================================================
// Signed Transaction
// =============================================================================

/// A transaction paired with its optional Ethereum-level signature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub tx: Transaction,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ethereum_signature: Option<TxEthSignature>,
}

impl SignedTransaction {
    /// Validate the inner transaction and, when present, the syntactic
    /// well-formedness of the outer Ethereum signature
    pub fn validate(&self) -> Result<(), TransactionError> {
        self.tx.validate()?;
        if let Some(eth_signature) = &self.ethereum_signature {
            eth_signature.validate()?;
        }
        Ok(())
    }
}
