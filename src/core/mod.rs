//! Core wire types of the rollup data contract
//!
//! This module contains the canonical shapes exchanged with the network:
//! - Identifiers (addresses, public key hashes)
//! - Arbitrary-precision amounts
//! - Account state across the three finality tiers
//! - The four transaction variants and their signatures
//! - Execution receipts and the derived finality status
//! - Fee breakdowns

pub mod account;
pub mod address;
pub mod amount;
pub mod fee;
pub mod receipt;
pub mod signature;
pub mod transaction;

pub use account::{AccountState, DepositingBalances, DepositingFunds, StateTier};
pub use address::{
    Address, ParseError, PubKeyHash, ADDRESS_PREFIX, IDENTIFIER_HEX_LEN, PUBKEY_HASH_PREFIX,
};
pub use amount::{AmountError, TokenAmount};
pub use fee::{Fee, FeeError, FeeType};
pub use receipt::{
    BlockInfo, PriorityOperationReceipt, ReceiptError, ReceiptStatus, TransactionReceipt,
};
pub use signature::{
    EthSignatureScheme, EthSignerType, Signature, SignatureError, TxEthSignature,
    VerificationMethod,
};
pub use transaction::{
    ChangePubKey, CloseAccount, Nonce, SignedTransaction, Transaction, TransactionError, Transfer,
    Withdraw,
};
