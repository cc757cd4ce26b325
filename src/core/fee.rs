//! Fee breakdowns reported by the network
//!
//! Every chargeable operation type has its own fee schedule (the number of
//! state chunks differs per operation). The network reports the gas and
//! proof components separately; the total must be their exact sum in the
//! arbitrary-precision representation.

use crate::core::amount::TokenAmount;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fee consistency errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    #[error("fee total mismatch: gasFee {gas_fee} + zkpFee {zkp_fee} != totalFee {total_fee}")]
    TotalMismatch {
        gas_fee: TokenAmount,
        zkp_fee: TokenAmount,
        total_fee: TokenAmount,
    },
    #[error("fee components overflow 256 bits")]
    Overflow,
}

/// Operation types with distinct fee schedules — a closed set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeType {
    Withdraw,
    Transfer,
    /// Transfer whose recipient account does not exist yet
    TransferToNew,
    /// Withdraw processed ahead of the regular batch schedule
    FastWithdraw,
}

/// Fee breakdown for one operation type, all values in wei
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub fee_type: FeeType,
    /// Gas units the operation consumes on the underlying chain
    pub gas_tx_amount: TokenAmount,
    pub gas_price_wei: TokenAmount,
    /// Gas component of the fee
    pub gas_fee: TokenAmount,
    /// Zero-knowledge proof component of the fee
    pub zkp_fee: TokenAmount,
    pub total_fee: TokenAmount,
}

impl Fee {
    /// Check that the total is exactly the sum of its components
    pub fn validate(&self) -> Result<(), FeeError> {
        let sum = self
            .gas_fee
            .checked_add(&self.zkp_fee)
            .ok_or(FeeError::Overflow)?;
        if sum != self.total_fee {
            return Err(FeeError::TotalMismatch {
                gas_fee: self.gas_fee,
                zkp_fee: self.zkp_fee,
                total_fee: self.total_fee,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(gas: u64, zkp: u64, total: u64) -> Fee {
        Fee {
            fee_type: FeeType::Transfer,
            gas_tx_amount: TokenAmount::from(350u64),
            gas_price_wei: TokenAmount::from(1_000_000_000u64),
            gas_fee: TokenAmount::from(gas),
            zkp_fee: TokenAmount::from(zkp),
            total_fee: TokenAmount::from(total),
        }
    }

    #[test]
    fn test_consistent_fee_validates() {
        assert!(fee(700, 300, 1000).validate().is_ok());
        assert!(fee(0, 0, 0).validate().is_ok());
    }

    #[test]
    fn test_total_mismatch_rejected() {
        let err = fee(700, 300, 999).validate().unwrap_err();
        assert!(matches!(err, FeeError::TotalMismatch { .. }));
    }

    #[test]
    fn test_component_overflow_rejected() {
        let max: TokenAmount =
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
                .parse()
                .unwrap();
        let fee = Fee {
            gas_fee: max,
            zkp_fee: TokenAmount::from(1u64),
            ..fee(0, 0, 0)
        };
        assert_eq!(fee.validate(), Err(FeeError::Overflow));
    }

    #[test]
    fn test_fee_type_tags() {
        for (tag, fee_type) in [
            ("\"Withdraw\"", FeeType::Withdraw),
            ("\"Transfer\"", FeeType::Transfer),
            ("\"TransferToNew\"", FeeType::TransferToNew),
            ("\"FastWithdraw\"", FeeType::FastWithdraw),
        ] {
            assert_eq!(serde_json::to_string(&fee_type).unwrap(), tag);
            assert_eq!(serde_json::from_str::<FeeType>(tag).unwrap(), fee_type);
        }
        assert!(serde_json::from_str::<FeeType>("\"Deposit\"").is_err());
    }

    #[test]
    fn test_fee_wire_format() {
        let json = r#"{
            "feeType": "FastWithdraw",
            "gasTxAmount": "30000",
            "gasPriceWei": "1000000000",
            "gasFee": "30000000000000",
            "zkpFee": "10000000000000",
            "totalFee": "40000000000000"
        }"#;
        let fee: Fee = serde_json::from_str(json).unwrap();
        assert_eq!(fee.fee_type, FeeType::FastWithdraw);
        assert!(fee.validate().is_ok());
    }
}
