//! Rollup Schema: the typed data contract of a layer-2 rollup client
//!
//! This crate defines the canonical shapes exchanged between a client and
//! a zk-rollup network — account state, signed transactions, fees,
//! receipts and token metadata — together with the pure validation and
//! normalization rules any client runtime needs on top of them:
//! - Fixed-format identifiers (`0x` addresses, `sync:` public key hashes)
//! - Arbitrary-precision amounts with lossless decimal-string encoding
//! - The closed set of transaction variants (Transfer, Withdraw,
//!   ChangePubKey, Close) as a tagged union
//! - Receipt flag sets collapsed into a single finality status
//! - Token symbol/address resolution against a network registry
//! - Fee breakdowns with exact-sum checking
//!
//! Everything here is a pure function over immutable values. Network
//! transport, signing and cryptographic verification belong to the client
//! runtime that consumes these types.
//!
//! # Example
//!
//! ```rust
//! use rollup_schema::core::{ReceiptStatus, TransactionReceipt};
//!
//! let receipt: TransactionReceipt = serde_json::from_str(
//!     r#"{"executed": true, "success": true,
//!         "block": {"blockNumber": 10, "committed": true, "verified": true}}"#,
//! ).unwrap();
//! assert_eq!(receipt.status().unwrap(), ReceiptStatus::Verified);
//! ```

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod token;

// Re-export commonly used types
pub use crate::core::{
    AccountState, Address, BlockInfo, Fee, FeeType, Nonce, PriorityOperationReceipt, PubKeyHash,
    ReceiptStatus, Signature, SignedTransaction, TokenAmount, Transaction, TransactionReceipt,
    TxEthSignature,
};
pub use crate::token::{ContractAddress, TokenInfo, TokenLike, TokenRegistry, ETH_TOKEN_ID};
