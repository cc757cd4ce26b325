//! Execution receipts and finality status
//!
//! The network reports transaction outcomes as flag sets: whether the
//! operation executed, whether it succeeded, and which block (if any)
//! includes it. `status()` collapses those flags into a single finality
//! status and rejects flag combinations the network can never produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Receipt consistency errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("inconsistent receipt: {0}")]
    InconsistentReceipt(String),
}

// =============================================================================
// Block Info
// =============================================================================

/// Pointer to the block that includes an operation, with its finality flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub block_number: u64,
    /// Block was included in a network-side batch
    pub committed: bool,
    /// Block's validity proof was accepted on the underlying chain
    pub verified: bool,
}

impl BlockInfo {
    /// A verified block must also be committed
    fn check(&self) -> Result<(), ReceiptError> {
        if self.verified && !self.committed {
            return Err(ReceiptError::InconsistentReceipt(format!(
                "block {} is verified but not committed",
                self.block_number
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Receipt Status
// =============================================================================

/// Derived finality status of an operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    /// Not yet executed by the network
    Pending,
    /// Executed successfully, not yet committed in a block
    Executed,
    /// Executed and rejected
    Failed,
    /// Included in a committed block awaiting its validity proof
    CommittedOnly,
    /// Proven and finalized on the underlying chain
    Verified,
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ReceiptStatus::Pending => "pending",
            ReceiptStatus::Executed => "executed",
            ReceiptStatus::Failed => "failed",
            ReceiptStatus::CommittedOnly => "committed",
            ReceiptStatus::Verified => "verified",
        };
        f.write_str(name)
    }
}

/// Classify an executed, successful operation by its block's finality
fn block_status(block: Option<&BlockInfo>) -> ReceiptStatus {
    match block {
        Some(b) if b.verified => ReceiptStatus::Verified,
        Some(b) if b.committed => ReceiptStatus::CommittedOnly,
        // Block pointer carries no finality information until committed
        _ => ReceiptStatus::Executed,
    }
}

// =============================================================================
// Transaction Receipt
// =============================================================================

/// Outcome of a transaction submitted directly to the network
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub executed: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fail_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub block: Option<BlockInfo>,
}

impl TransactionReceipt {
    /// Derive the finality status
    ///
    /// Total over every receipt the network can produce. The two flag
    /// combinations the network never emits are rejected:
    /// - executed with no success flag
    /// - success with a failure reason attached
    pub fn status(&self) -> Result<ReceiptStatus, ReceiptError> {
        if let Some(block) = &self.block {
            block.check()?;
        }
        if !self.executed {
            return Ok(ReceiptStatus::Pending);
        }
        let success = self.success.ok_or_else(|| {
            ReceiptError::InconsistentReceipt(
                "executed receipt is missing the success flag".to_string(),
            )
        })?;
        if success && self.fail_reason.is_some() {
            return Err(ReceiptError::InconsistentReceipt(
                "successful receipt carries a failReason".to_string(),
            ));
        }
        if !success {
            return Ok(ReceiptStatus::Failed);
        }
        Ok(block_status(self.block.as_ref()))
    }
}

// =============================================================================
// Priority Operation Receipt
// =============================================================================

/// Outcome of an operation originated on the underlying chain (e.g. a deposit)
///
/// Priority operations cannot fail once accepted, so there is no success
/// flag or failure reason.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityOperationReceipt {
    pub executed: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub block: Option<BlockInfo>,
}

impl PriorityOperationReceipt {
    /// Derive the finality status; never yields [`ReceiptStatus::Failed`]
    pub fn status(&self) -> Result<ReceiptStatus, ReceiptError> {
        if let Some(block) = &self.block {
            block.check()?;
        }
        if !self.executed {
            return Ok(ReceiptStatus::Pending);
        }
        Ok(block_status(self.block.as_ref()))
    }
}
